//! Monthly revenue figures shown on the dashboard chart.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Revenue booked in a single month.
///
/// `month` is a short label such as `"Jan"`; labels are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Revenue {
    #[schema(example = "Jan")]
    pub month: String,
    #[schema(example = 2000)]
    pub revenue: i32,
}
