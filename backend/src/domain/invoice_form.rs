//! Validation of submitted invoice forms.
//!
//! Raw form values are checked field by field before anything reaches the
//! store. Every failing field is reported, not just the first, so the form can
//! annotate all of its inputs in one round trip.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use super::customer::CustomerId;
use super::invoice::{Cents, InvoiceDraft, InvoiceStatus};
use super::Error;

/// Shown when the customer is missing or not a known identifier shape.
pub const CUSTOMER_REQUIRED: &str = "Please select a customer";
/// Shown when the amount is missing, not a number, or not above zero.
pub const AMOUNT_NOT_POSITIVE: &str = "Please enter an amount greater than $0.";
/// Shown when the amount in cents does not fit the amount column.
pub const AMOUNT_TOO_LARGE: &str = "Please enter a smaller amount.";
/// Shown when the status is neither `pending` nor `paid`.
pub const STATUS_REQUIRED: &str = "Please select an invoice status.";

/// Raw invoice form values as submitted.
///
/// Every field is optional so that a missing input is reported as a field
/// error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormInput {
    #[schema(example = "3958dc9e-712f-4377-85e9-fec4b6a6442a")]
    pub customer_id: Option<String>,
    #[schema(example = "12.34")]
    pub amount: Option<String>,
    #[schema(example = "pending")]
    pub status: Option<String>,
}

/// Which write the form is feeding; selects the summary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Create,
    Update,
}

impl FormAction {
    /// Summary attached to a rejected submission.
    #[must_use]
    pub const fn failure_summary(self) -> &'static str {
        match self {
            Self::Create => "Missing Fields. Failed to Create Invoice.",
            Self::Update => "Missing Fields. Failed to Update Invoice.",
        }
    }
}

/// Form inputs that can carry errors, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    CustomerId,
    Amount,
    Status,
}

/// Field-level validation failures for one submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{summary}")]
pub struct InvoiceValidationErrors {
    summary: &'static str,
    fields: BTreeMap<InvoiceField, Vec<&'static str>>,
}

impl InvoiceValidationErrors {
    fn new(action: FormAction) -> Self {
        Self {
            summary: action.failure_summary(),
            fields: BTreeMap::new(),
        }
    }

    fn push(&mut self, field: InvoiceField, message: &'static str) {
        self.fields.entry(field).or_default().push(message);
    }

    /// Overall message for the rejected submission.
    #[must_use]
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Messages recorded against `field`, in the order they were raised.
    #[must_use]
    pub fn field(&self, field: InvoiceField) -> &[&'static str] {
        self.fields.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Fields with at least one message, in display order.
    pub fn fields(&self) -> impl Iterator<Item = InvoiceField> + '_ {
        self.fields.keys().copied()
    }
}

impl From<InvoiceValidationErrors> for Error {
    fn from(value: InvoiceValidationErrors) -> Self {
        Error::invalid_request(value.summary).with_details(json!({ "errors": value.fields }))
    }
}

/// Validate a submitted invoice form.
///
/// Returns the typed draft when every field passes, otherwise every
/// field-level failure together with the summary for `action`.
///
/// # Examples
/// ```
/// use invoice_dashboard::domain::invoice_form::{validate_invoice, FormAction, InvoiceFormInput};
///
/// let input = InvoiceFormInput {
///     customer_id: Some("3958dc9e-712f-4377-85e9-fec4b6a6442a".into()),
///     amount: Some("12.34".into()),
///     status: Some("paid".into()),
/// };
/// let draft = validate_invoice(&input, FormAction::Create).expect("valid form");
/// assert_eq!(draft.amount.get(), 1234);
/// ```
pub fn validate_invoice(
    input: &InvoiceFormInput,
    action: FormAction,
) -> Result<InvoiceDraft, InvoiceValidationErrors> {
    let mut errors = InvoiceValidationErrors::new(action);

    let customer_id = parse_customer(input.customer_id.as_deref())
        .map_err(|message| errors.push(InvoiceField::CustomerId, message))
        .ok();
    let amount = parse_amount(input.amount.as_deref())
        .map_err(|message| errors.push(InvoiceField::Amount, message))
        .ok();
    let status = input
        .status
        .as_deref()
        .and_then(|raw| raw.parse::<InvoiceStatus>().ok())
        .ok_or(STATUS_REQUIRED)
        .map_err(|message| errors.push(InvoiceField::Status, message))
        .ok();

    match (customer_id, amount, status) {
        (Some(customer_id), Some(amount), Some(status)) => Ok(InvoiceDraft {
            customer_id,
            amount,
            status,
        }),
        _ => Err(errors),
    }
}

fn parse_customer(raw: Option<&str>) -> Result<CustomerId, &'static str> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
        .ok_or(CUSTOMER_REQUIRED)
}

/// Parse a dollar amount and convert it to whole cents, rounding half away
/// from zero.
fn parse_amount(raw: Option<&str>) -> Result<Cents, &'static str> {
    let dollars = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or(AMOUNT_NOT_POSITIVE)?;

    let cents = (dollars * 100.0).round();
    if cents < 1.0 {
        return Err(AMOUNT_NOT_POSITIVE);
    }
    if cents > f64::from(i32::MAX) {
        return Err(AMOUNT_TOO_LARGE);
    }
    let cents = cents as i32;
    Ok(Cents::new(cents))
}
