//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven repository ports, backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) stay private to
//!   this module.
//! - Every database error is mapped onto the port's error enum; the raw
//!   driver message only reaches the logs.
//!
//! # Example
//!
//! ```ignore
//! use invoice_dashboard::outbound::persistence::{DbPool, DieselInvoiceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/invoices")).await?;
//! let invoices = DieselInvoiceRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_customer_repository;
mod diesel_invoice_repository;
mod diesel_login_service;
mod diesel_revenue_repository;
mod diesel_seed_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod settings;
mod user_persistence_error_mapping;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_invoice_repository::DieselInvoiceRepository;
pub use diesel_login_service::DieselLoginService;
pub use diesel_revenue_repository::DieselRevenueRepository;
pub use diesel_seed_repository::DieselSeedRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
pub use settings::DatabaseSettings;
