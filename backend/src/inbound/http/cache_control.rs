//! Cache policy for signed-in dashboard responses.

use actix_web::http::header::{CACHE_CONTROL, HeaderName};

/// Dashboard data is per-user and changes on every invoice write.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// Header tuple for [`PRIVATE_NO_CACHE_MUST_REVALIDATE`].
pub fn private_no_cache_header() -> (HeaderName, &'static str) {
    (CACHE_CONTROL, PRIVATE_NO_CACHE_MUST_REVALIDATE)
}
