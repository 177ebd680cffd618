//! Dashboard overview service.
//!
//! Card figures come from three independent aggregates that are awaited
//! together; the first failure fails the whole card set.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    CustomerRepository, DashboardQuery, InvoiceRepository, RevenueRepository,
};
use crate::domain::store_failure::fetch_failed;
use crate::domain::{
    CardData, Error, LATEST_INVOICES_LIMIT, LatestInvoice, Revenue, format_currency,
};

const CARD_DATA_FAILED: &str = "Failed to fetch card data.";

/// Service implementing [`DashboardQuery`].
#[derive(Clone)]
pub struct DashboardService<I, C, R> {
    invoices: Arc<I>,
    customers: Arc<C>,
    revenue: Arc<R>,
}

impl<I, C, R> DashboardService<I, C, R> {
    /// Create a dashboard service over the three read repositories.
    pub fn new(invoices: Arc<I>, customers: Arc<C>, revenue: Arc<R>) -> Self {
        Self {
            invoices,
            customers,
            revenue,
        }
    }
}

#[async_trait]
impl<I, C, R> DashboardQuery for DashboardService<I, C, R>
where
    I: InvoiceRepository,
    C: CustomerRepository,
    R: RevenueRepository,
{
    async fn revenue(&self) -> Result<Vec<Revenue>, Error> {
        self.revenue
            .list()
            .await
            .map_err(fetch_failed("revenue", "Failed to fetch revenue data."))
    }

    async fn latest_invoices(&self) -> Result<Vec<LatestInvoice>, Error> {
        let rows = self
            .invoices
            .latest(LATEST_INVOICES_LIMIT)
            .await
            .map_err(fetch_failed("latest_invoices", "Failed to fetch the latest invoices."))?;

        Ok(rows
            .into_iter()
            .map(|row| LatestInvoice {
                id: row.id,
                name: row.name,
                email: row.email,
                image_url: row.image_url,
                amount: format_currency(i64::from(row.amount)),
            })
            .collect())
    }

    async fn card_data(&self) -> Result<CardData, Error> {
        let invoice_count = async {
            self.invoices
                .count()
                .await
                .map_err(fetch_failed("card_data.invoice_count", CARD_DATA_FAILED))
        };
        let customer_count = async {
            self.customers
                .count()
                .await
                .map_err(fetch_failed("card_data.customer_count", CARD_DATA_FAILED))
        };
        let totals = async {
            self.invoices
                .totals_by_status()
                .await
                .map_err(fetch_failed("card_data.status_totals", CARD_DATA_FAILED))
        };

        let (invoices, customers, totals) = try_join!(invoice_count, customer_count, totals)?;
        Ok(CardData::new(invoices, customers, totals))
    }
}
