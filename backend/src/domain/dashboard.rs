//! Headline figures shown on the dashboard cards.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::format_currency;

/// Sums of invoice amounts in cents, split by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceTotals {
    pub paid: i64,
    pub pending: i64,
}

/// Figures for the dashboard cards.
///
/// Totals are reported both in cents and preformatted as dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    pub total_paid_cents: i64,
    pub total_pending_cents: i64,
    #[schema(example = "$1,234.56")]
    pub total_paid_invoices: String,
    #[schema(example = "$78.90")]
    pub total_pending_invoices: String,
}

impl CardData {
    /// Assemble the cards from the three aggregate reads.
    #[must_use]
    pub fn new(number_of_invoices: i64, number_of_customers: i64, totals: InvoiceTotals) -> Self {
        Self {
            number_of_invoices,
            number_of_customers,
            total_paid_cents: totals.paid,
            total_pending_cents: totals.pending,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        }
    }
}
