//! Port for invoice persistence and the invoice read models.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::{
    InvoiceDraft, InvoiceId, InvoiceRecord, InvoiceTableRow, InvoiceTotals, NewInvoice,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by invoice repository adapters.
    pub enum InvoiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "invoice repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "invoice repository query failed: {message}",
    }
}

/// Port for reading and writing invoices.
///
/// Search methods match `query` case-insensitively against the customer's
/// name and email and the invoice's amount, date and status rendered as text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert an invoice; the store assigns the identifier.
    async fn insert(&self, invoice: &NewInvoice) -> Result<InvoiceId, InvoiceRepositoryError>;

    /// Overwrite customer, amount and status. Returns `false` when no row
    /// has `id`.
    async fn update(
        &self,
        id: &InvoiceId,
        draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError>;

    /// Remove an invoice. Returns `false` when no row has `id`.
    async fn delete(&self, id: &InvoiceId) -> Result<bool, InvoiceRepositoryError>;

    /// Load a single invoice.
    async fn find_by_id(
        &self,
        id: &InvoiceId,
    ) -> Result<Option<InvoiceRecord>, InvoiceRepositoryError>;

    /// The `limit` most recent invoices joined with their customers.
    async fn latest(&self, limit: i64) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError>;

    /// One page of invoices matching `query`, newest first.
    async fn search(
        &self,
        query: &str,
        window: PageWindow,
    ) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError>;

    /// Number of invoices matching `query`.
    async fn count_matching(&self, query: &str) -> Result<u64, InvoiceRepositoryError>;

    /// Number of invoices overall.
    async fn count(&self) -> Result<i64, InvoiceRepositoryError>;

    /// Amount sums grouped by status.
    async fn totals_by_status(&self) -> Result<InvoiceTotals, InvoiceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise invoice storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceRepository;

#[async_trait]
impl InvoiceRepository for FixtureInvoiceRepository {
    async fn insert(&self, _invoice: &NewInvoice) -> Result<InvoiceId, InvoiceRepositoryError> {
        Ok(InvoiceId::from_uuid(uuid::Uuid::nil()))
    }

    async fn update(
        &self,
        _id: &InvoiceId,
        _draft: &InvoiceDraft,
    ) -> Result<bool, InvoiceRepositoryError> {
        Ok(false)
    }

    async fn delete(&self, _id: &InvoiceId) -> Result<bool, InvoiceRepositoryError> {
        Ok(false)
    }

    async fn find_by_id(
        &self,
        _id: &InvoiceId,
    ) -> Result<Option<InvoiceRecord>, InvoiceRepositoryError> {
        Ok(None)
    }

    async fn latest(&self, _limit: i64) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError> {
        Ok(Vec::new())
    }

    async fn search(
        &self,
        _query: &str,
        _window: PageWindow,
    ) -> Result<Vec<InvoiceTableRow>, InvoiceRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_matching(&self, _query: &str) -> Result<u64, InvoiceRepositoryError> {
        Ok(0)
    }

    async fn count(&self) -> Result<i64, InvoiceRepositoryError> {
        Ok(0)
    }

    async fn totals_by_status(&self) -> Result<InvoiceTotals, InvoiceRepositoryError> {
        Ok(InvoiceTotals::default())
    }
}
