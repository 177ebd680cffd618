//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`InvoiceCommand`, `InvoiceQuery`, `DashboardQuery`,
//! `LoginService`) are called by inbound adapters. Driven ports describe what
//! the domain needs from storage and from the cache layer.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_repository;
mod dashboard_query;
mod invoice_command;
mod invoice_query;
mod invoice_repository;
mod listing_revalidator;
mod login_service;
mod revenue_repository;
mod seed_repository;
mod user_repository;

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{
    CustomerRepository, CustomerRepositoryError, FixtureCustomerRepository,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, FixtureDashboardQuery};
#[cfg(test)]
pub use invoice_command::MockInvoiceCommand;
pub use invoice_command::{FixtureInvoiceCommand, InvoiceCommand};
#[cfg(test)]
pub use invoice_query::MockInvoiceQuery;
pub use invoice_query::{FixtureInvoiceQuery, InvoiceQuery};
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
pub use invoice_repository::{
    FixtureInvoiceRepository, InvoiceRepository, InvoiceRepositoryError,
};
#[cfg(test)]
pub use listing_revalidator::MockListingRevalidator;
pub use listing_revalidator::{
    INVOICES_LISTING_PATH, ListingRevalidator, NoOpListingRevalidator,
};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use revenue_repository::MockRevenueRepository;
pub use revenue_repository::{
    FixtureRevenueRepository, RevenueRepository, RevenueRepositoryError,
};
#[cfg(test)]
pub use seed_repository::MockSeedRepository;
pub use seed_repository::{
    SeedCounts, SeedData, SeedRepository, SeedRepositoryError, SeedUser,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
