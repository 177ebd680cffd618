//! Driving port for invoice and customer reads behind the invoice pages.

use async_trait::async_trait;

use crate::domain::{CustomerField, Error, InvoiceForm, InvoiceId, InvoiceSearch, InvoiceTableRow};

/// Domain use-case port for the invoices table and edit form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceQuery: Send + Sync {
    /// One page of invoices matching the search, newest first.
    async fn filtered_invoices(&self, search: &InvoiceSearch)
    -> Result<Vec<InvoiceTableRow>, Error>;

    /// Number of pages needed to list every invoice matching `query`.
    async fn invoice_pages(&self, query: &str) -> Result<u64, Error>;

    /// A stored invoice in the shape the edit form expects.
    async fn invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceForm>, Error>;

    /// Every customer's id and name, ordered by name.
    async fn customers(&self) -> Result<Vec<CustomerField>, Error>;
}

/// Query port over an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureInvoiceQuery;

#[async_trait]
impl InvoiceQuery for FixtureInvoiceQuery {
    async fn filtered_invoices(
        &self,
        _search: &InvoiceSearch,
    ) -> Result<Vec<InvoiceTableRow>, Error> {
        Ok(Vec::new())
    }

    async fn invoice_pages(&self, _query: &str) -> Result<u64, Error> {
        Ok(0)
    }

    async fn invoice_by_id(&self, _id: &InvoiceId) -> Result<Option<InvoiceForm>, Error> {
        Ok(None)
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, Error> {
        Ok(Vec::new())
    }
}
