//! Port signalling that a cached listing is stale after a write.

/// Path of the invoice listing refreshed after every invoice write.
pub const INVOICES_LISTING_PATH: &str = "/dashboard/invoices";

/// Notified after a successful write so views of `path` can be refreshed.
#[cfg_attr(test, mockall::automock)]
pub trait ListingRevalidator: Send + Sync {
    /// Mark the listing at `path` as stale.
    fn revalidate(&self, path: &str);
}

/// Revalidator for deployments without any cached listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpListingRevalidator;

impl ListingRevalidator for NoOpListingRevalidator {
    fn revalidate(&self, _path: &str) {}
}
