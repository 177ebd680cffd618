//! Listing revalidation for a server without a shared render cache.
//!
//! Responses are already marked `private, no-cache`, so a write only has to
//! advance the listing generation and record it in the logs.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::domain::ports::ListingRevalidator;

/// Counts revalidations and logs each one.
#[derive(Debug, Default)]
pub struct TracingListingRevalidator {
    generation: AtomicU64,
}

impl TracingListingRevalidator {
    /// Number of revalidations signalled so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Relaxed)
    }
}

impl ListingRevalidator for TracingListingRevalidator {
    fn revalidate(&self, path: &str) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(path, generation, "listing revalidated");
    }
}
