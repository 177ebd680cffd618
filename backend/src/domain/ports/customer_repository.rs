//! Port for customer reads.

use async_trait::async_trait;

use crate::domain::CustomerField;

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "customer repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "customer repository query failed: {message}",
    }
}

/// Port for reading customers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Every customer's id and name, ordered by name.
    async fn list_fields(&self) -> Result<Vec<CustomerField>, CustomerRepositoryError>;

    /// Number of customers.
    async fn count(&self) -> Result<i64, CustomerRepositoryError>;
}

/// Fixture implementation for tests that do not exercise customer storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCustomerRepository;

#[async_trait]
impl CustomerRepository for FixtureCustomerRepository {
    async fn list_fields(&self) -> Result<Vec<CustomerField>, CustomerRepositoryError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<i64, CustomerRepositoryError> {
        Ok(0)
    }
}
