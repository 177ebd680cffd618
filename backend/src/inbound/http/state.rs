//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    DashboardQuery, FixtureDashboardQuery, FixtureInvoiceCommand, FixtureInvoiceQuery,
    FixtureLoginService, InvoiceCommand, InvoiceQuery, LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub invoices: Arc<dyn InvoiceCommand>,
    pub invoices_query: Arc<dyn InvoiceQuery>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Construct state from explicit ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use invoice_dashboard::domain::ports::{
    ///     FixtureDashboardQuery, FixtureInvoiceCommand, FixtureInvoiceQuery, FixtureLoginService,
    /// };
    /// use invoice_dashboard::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixtureInvoiceCommand),
    ///     Arc::new(FixtureInvoiceQuery),
    ///     Arc::new(FixtureDashboardQuery),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        invoices: Arc<dyn InvoiceCommand>,
        invoices_query: Arc<dyn InvoiceQuery>,
        dashboard: Arc<dyn DashboardQuery>,
    ) -> Self {
        Self {
            login,
            invoices,
            invoices_query,
            dashboard,
        }
    }

    /// State backed entirely by in-memory fixtures, for running without a
    /// database.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixtureInvoiceCommand),
            Arc::new(FixtureInvoiceQuery),
            Arc::new(FixtureDashboardQuery),
        )
    }
}
