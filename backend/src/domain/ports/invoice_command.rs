//! Driving port for invoice writes.

use async_trait::async_trait;

use crate::domain::invoice_form::{validate_invoice, FormAction, InvoiceFormInput};
use crate::domain::{Error, InvoiceId};

/// Domain use-case port for creating, editing and removing invoices.
///
/// Form input is validated before anything is written. Rejected forms come
/// back as [`crate::domain::ErrorCode::InvalidRequest`] carrying the
/// per-field messages in the error details.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceCommand: Send + Sync {
    /// Create an invoice dated today.
    async fn create(&self, input: &InvoiceFormInput) -> Result<InvoiceId, Error>;

    /// Replace an invoice's customer, amount and status, keeping its date.
    ///
    /// Updating an id that does not exist is not an error.
    async fn update(&self, id: &InvoiceId, input: &InvoiceFormInput) -> Result<(), Error>;

    /// Remove an invoice. Deleting an absent id is not an error.
    async fn delete(&self, id: &InvoiceId) -> Result<(), Error>;
}

/// Command port that validates forms but writes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceCommand;

#[async_trait]
impl InvoiceCommand for FixtureInvoiceCommand {
    async fn create(&self, input: &InvoiceFormInput) -> Result<InvoiceId, Error> {
        validate_invoice(input, FormAction::Create)?;
        Ok(InvoiceId::from_uuid(uuid::Uuid::nil()))
    }

    async fn update(&self, _id: &InvoiceId, input: &InvoiceFormInput) -> Result<(), Error> {
        validate_invoice(input, FormAction::Update)?;
        Ok(())
    }

    async fn delete(&self, _id: &InvoiceId) -> Result<(), Error> {
        Ok(())
    }
}
