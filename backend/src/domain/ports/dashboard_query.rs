//! Driving port for the dashboard overview.

use async_trait::async_trait;

use crate::domain::{CardData, Error, InvoiceTotals, LatestInvoice, Revenue};

/// Domain use-case port for the overview page panels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Revenue per month for the chart.
    async fn revenue(&self) -> Result<Vec<Revenue>, Error>;

    /// The most recent invoices with formatted amounts.
    async fn latest_invoices(&self) -> Result<Vec<LatestInvoice>, Error>;

    /// Invoice and customer counts with paid and pending totals.
    async fn card_data(&self) -> Result<CardData, Error>;
}

/// Dashboard port over an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDashboardQuery;

#[async_trait]
impl DashboardQuery for FixtureDashboardQuery {
    async fn revenue(&self) -> Result<Vec<Revenue>, Error> {
        Ok(Vec::new())
    }

    async fn latest_invoices(&self) -> Result<Vec<LatestInvoice>, Error> {
        Ok(Vec::new())
    }

    async fn card_data(&self) -> Result<CardData, Error> {
        Ok(CardData::new(0, 0, InvoiceTotals::default()))
    }
}
