//! Invoice records and the read models derived from them.
//!
//! Amounts are always carried in cents. Conversions to decimal dollars happen
//! at the edges: when parsing form input and when the edit form asks for the
//! stored amount back.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use pagination::{PageNumber, PageSize};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::customer::CustomerId;

/// Invoices listed per page on the dashboard table.
pub const INVOICES_PER_PAGE: PageSize = match std::num::NonZeroU32::new(6) {
    Some(size) => PageSize::from_non_zero(size),
    None => panic!("page size must be non-zero"),
};

/// Number of rows shown in the "latest invoices" panel.
pub const LATEST_INVOICES_LIMIT: i64 = 5;

/// Stable invoice identifier generated by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for InvoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Error returned when a status string is neither `pending` nor `paid`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status: {0}")]
pub struct UnknownInvoiceStatus(pub String);

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Lowercase label stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = UnknownInvoiceStatus;

    /// Matching is exact; `"Paid"` or `" paid"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            other => Err(UnknownInvoiceStatus(other.to_owned())),
        }
    }
}

/// Amount in cents, always strictly positive once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i32);

impl Cents {
    /// Wrap a stored cent value.
    #[must_use]
    pub const fn new(cents: i32) -> Self {
        Self(cents)
    }

    /// Raw cent value as stored in the `amount` column.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The amount in dollars, as the edit form displays it.
    #[must_use]
    pub fn to_dollars(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Validated invoice fields shared by the create and update paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// Invoice ready to be inserted: a draft stamped with its issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl NewInvoice {
    /// Stamp `draft` with the date it was issued.
    #[must_use]
    pub fn issued_on(draft: InvoiceDraft, date: NaiveDate) -> Self {
        Self {
            customer_id: draft.customer_id,
            amount: draft.amount,
            status: draft.status,
            date,
        }
    }
}

/// Stored invoice as loaded into the edit form.
///
/// `amount` is in dollars so the form can show it as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    #[schema(example = 12.34)]
    pub amount: f64,
    pub status: InvoiceStatus,
}

/// Raw invoice row as held by the store, before any projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceRecord {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub amount: Cents,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl From<InvoiceRecord> for InvoiceForm {
    fn from(value: InvoiceRecord) -> Self {
        Self {
            id: value.id,
            customer_id: value.customer_id,
            amount: value.amount.to_dollars(),
            status: value.status,
        }
    }
}

/// Row of the paginated invoices table, joined with its customer.
///
/// `amount` stays in cents; the table formats it client side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTableRow {
    pub id: InvoiceId,
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    #[schema(value_type = String, format = Date, example = "2022-12-06")]
    pub date: NaiveDate,
    #[schema(example = 1234)]
    pub amount: i32,
    pub status: InvoiceStatus,
}

/// Entry of the "latest invoices" panel with a preformatted amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LatestInvoice {
    pub id: InvoiceId,
    pub name: String,
    pub email: String,
    pub image_url: String,
    #[schema(example = "$12.34")]
    pub amount: String,
}

/// Search criteria for the invoices table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvoiceSearch {
    /// Case-insensitive substring; empty matches everything.
    pub query: String,
    pub page: PageNumber,
}

impl InvoiceSearch {
    /// Build search criteria from a query string and page.
    pub fn new(query: impl Into<String>, page: PageNumber) -> Self {
        Self {
            query: query.into(),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", InvoiceStatus::Pending)]
    #[case("paid", InvoiceStatus::Paid)]
    fn status_parses_exact_labels(#[case] raw: &str, #[case] expected: InvoiceStatus) {
        assert_eq!(raw.parse::<InvoiceStatus>(), Ok(expected));
        assert_eq!(expected.to_string(), raw);
    }

    #[rstest]
    #[case("Paid")]
    #[case(" pending")]
    #[case("overdue")]
    #[case("")]
    fn status_rejects_anything_else(#[case] raw: &str) {
        assert_eq!(
            raw.parse::<InvoiceStatus>(),
            Err(UnknownInvoiceStatus(raw.to_owned()))
        );
    }

    #[rstest]
    #[case(1_234, 12.34)]
    #[case(1, 0.01)]
    #[case(100_000, 1_000.0)]
    fn cents_convert_back_to_dollars(#[case] cents: i32, #[case] dollars: f64) {
        assert!((Cents::new(cents).to_dollars() - dollars).abs() < f64::EPSILON);
    }

    #[rstest]
    fn invoice_form_serialises_in_camel_case() {
        let record = InvoiceRecord {
            id: InvoiceId::from_uuid(Uuid::nil()),
            customer_id: CustomerId::from_uuid(Uuid::nil()),
            amount: Cents::new(1_234),
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"),
        };
        let value = serde_json::to_value(InvoiceForm::from(record)).expect("serialises");
        assert_eq!(
            value,
            serde_json::json!({
                "id": Uuid::nil(),
                "customerId": Uuid::nil(),
                "amount": 12.34,
                "status": "paid",
            })
        );
    }

    #[rstest]
    fn page_size_is_six() {
        assert_eq!(INVOICES_PER_PAGE.get(), 6);
    }
}
