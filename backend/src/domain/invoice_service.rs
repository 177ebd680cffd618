//! Invoice domain services.
//!
//! The command service validates forms, stamps new invoices with today's
//! date, writes through the repository, and signals that the invoice listing
//! is stale. The query service backs the invoices table and edit form.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{PageWindow, total_pages};
use tracing::debug;

use crate::domain::invoice_form::{FormAction, InvoiceFormInput, validate_invoice};
use crate::domain::ports::{
    CustomerRepository, INVOICES_LISTING_PATH, InvoiceCommand, InvoiceQuery, InvoiceRepository,
    ListingRevalidator,
};
use crate::domain::store_failure::{fetch_failed, persistence_failed};
use crate::domain::{
    CustomerField, Error, INVOICES_PER_PAGE, InvoiceForm, InvoiceId, InvoiceSearch,
    InvoiceTableRow, NewInvoice,
};

const CREATE_FAILED: &str = "Database Error: Failed to Create Invoice.";
const UPDATE_FAILED: &str = "Database Error: Failed to Update Invoice.";
const DELETE_FAILED: &str = "Database Error: Failed to Delete Invoice.";

/// Invoice service implementing [`InvoiceCommand`].
#[derive(Clone)]
pub struct InvoiceCommandService<R, V> {
    invoices: Arc<R>,
    revalidator: Arc<V>,
    clock: Arc<dyn Clock>,
}

impl<R, V> InvoiceCommandService<R, V> {
    /// Create a command service writing through `invoices`.
    pub fn new(invoices: Arc<R>, revalidator: Arc<V>, clock: Arc<dyn Clock>) -> Self {
        Self {
            invoices,
            revalidator,
            clock,
        }
    }
}

impl<R, V> InvoiceCommandService<R, V>
where
    V: ListingRevalidator,
{
    fn listing_changed(&self) {
        self.revalidator.revalidate(INVOICES_LISTING_PATH);
    }
}

#[async_trait]
impl<R, V> InvoiceCommand for InvoiceCommandService<R, V>
where
    R: InvoiceRepository,
    V: ListingRevalidator,
{
    async fn create(&self, input: &InvoiceFormInput) -> Result<InvoiceId, Error> {
        let draft = validate_invoice(input, FormAction::Create)?;
        let invoice = NewInvoice::issued_on(draft, self.clock.utc().date_naive());

        let id = self
            .invoices
            .insert(&invoice)
            .await
            .map_err(persistence_failed("create_invoice", CREATE_FAILED))?;

        self.listing_changed();
        Ok(id)
    }

    async fn update(&self, id: &InvoiceId, input: &InvoiceFormInput) -> Result<(), Error> {
        let draft = validate_invoice(input, FormAction::Update)?;

        let updated = self
            .invoices
            .update(id, &draft)
            .await
            .map_err(persistence_failed("update_invoice", UPDATE_FAILED))?;
        if !updated {
            debug!(invoice_id = %id, "update matched no invoice");
        }

        self.listing_changed();
        Ok(())
    }

    async fn delete(&self, id: &InvoiceId) -> Result<(), Error> {
        let deleted = self
            .invoices
            .delete(id)
            .await
            .map_err(persistence_failed("delete_invoice", DELETE_FAILED))?;
        if !deleted {
            debug!(invoice_id = %id, "delete matched no invoice");
        }

        self.listing_changed();
        Ok(())
    }
}

/// Invoice service implementing [`InvoiceQuery`].
#[derive(Clone)]
pub struct InvoiceQueryService<R, C> {
    invoices: Arc<R>,
    customers: Arc<C>,
}

impl<R, C> InvoiceQueryService<R, C> {
    /// Create a query service over the invoice and customer repositories.
    pub fn new(invoices: Arc<R>, customers: Arc<C>) -> Self {
        Self {
            invoices,
            customers,
        }
    }
}

#[async_trait]
impl<R, C> InvoiceQuery for InvoiceQueryService<R, C>
where
    R: InvoiceRepository,
    C: CustomerRepository,
{
    async fn filtered_invoices(
        &self,
        search: &InvoiceSearch,
    ) -> Result<Vec<InvoiceTableRow>, Error> {
        let window = PageWindow::new(search.page, INVOICES_PER_PAGE);
        self.invoices
            .search(&search.query, window)
            .await
            .map_err(fetch_failed("filtered_invoices", "Failed to fetch invoices."))
    }

    async fn invoice_pages(&self, query: &str) -> Result<u64, Error> {
        let matches = self.invoices.count_matching(query).await.map_err(fetch_failed(
            "invoice_pages",
            "Failed to fetch total number of invoices.",
        ))?;
        Ok(total_pages(matches, INVOICES_PER_PAGE))
    }

    async fn invoice_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceForm>, Error> {
        let record = self
            .invoices
            .find_by_id(id)
            .await
            .map_err(fetch_failed("invoice_by_id", "Failed to fetch invoice."))?;
        Ok(record.map(InvoiceForm::from))
    }

    async fn customers(&self) -> Result<Vec<CustomerField>, Error> {
        self.customers
            .list_fields()
            .await
            .map_err(fetch_failed("customers", "Failed to fetch all customers."))
    }
}

#[cfg(test)]
#[path = "invoice_service_tests.rs"]
mod tests;
