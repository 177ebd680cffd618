//! Port for loading placeholder data into an empty store.

use async_trait::async_trait;

use crate::domain::{Customer, InvoiceRecord, PasswordHash, Revenue, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by seeding adapters.
    pub enum SeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "seed repository connection failed: {message}",
        /// Insert failed during execution.
        Query { message: String } => "seed repository query failed: {message}",
    }
}

/// User row to seed, with its password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
}

/// Everything written by one seeding run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub users: Vec<SeedUser>,
    pub customers: Vec<Customer>,
    pub invoices: Vec<InvoiceRecord>,
    pub revenue: Vec<Revenue>,
}

/// Rows actually inserted per table; rows already present are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub customers: usize,
    pub invoices: usize,
    pub revenue: usize,
}

/// Port for bulk-inserting seed rows.
///
/// Implementations insert everything in one transaction and skip rows whose
/// key already exists, so reseeding is a no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Insert `data`, reporting how many rows were new.
    async fn seed(&self, data: &SeedData) -> Result<SeedCounts, SeedRepositoryError>;
}
