//! Builders wiring domain services onto HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use invoice_dashboard::domain::{DashboardService, InvoiceCommandService, InvoiceQueryService};
use invoice_dashboard::inbound::http::state::HttpState;
use invoice_dashboard::outbound::persistence::{
    DbPool, DieselCustomerRepository, DieselInvoiceRepository, DieselLoginService,
    DieselRevenueRepository, DieselUserRepository,
};
use invoice_dashboard::outbound::revalidation::TracingListingRevalidator;

use super::ServerConfig;

fn build_pooled_state(pool: &DbPool) -> HttpState {
    let invoices = Arc::new(DieselInvoiceRepository::new(pool.clone()));
    let customers = Arc::new(DieselCustomerRepository::new(pool.clone()));
    let revenue = Arc::new(DieselRevenueRepository::new(pool.clone()));

    HttpState::new(
        Arc::new(DieselLoginService::new(DieselUserRepository::new(
            pool.clone(),
        ))),
        Arc::new(InvoiceCommandService::new(
            invoices.clone(),
            Arc::new(TracingListingRevalidator::default()),
            Arc::new(DefaultClock),
        )),
        Arc::new(InvoiceQueryService::new(invoices.clone(), customers.clone())),
        Arc::new(DashboardService::new(invoices, customers, revenue)),
    )
}

/// Build HTTP state from the configured ports, falling back to fixtures when
/// no database is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_pooled_state(pool),
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}
