//! Port for the monthly revenue table.

use async_trait::async_trait;

use crate::domain::Revenue;

use super::define_port_error;

define_port_error! {
    /// Errors raised by revenue repository adapters.
    pub enum RevenueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "revenue repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "revenue repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevenueRepository: Send + Sync {
    /// All revenue rows.
    async fn list(&self) -> Result<Vec<Revenue>, RevenueRepositoryError>;
}

/// Fixture implementation returning no revenue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRevenueRepository;

#[async_trait]
impl RevenueRepository for FixtureRevenueRepository {
    async fn list(&self) -> Result<Vec<Revenue>, RevenueRepositoryError> {
        Ok(Vec::new())
    }
}
