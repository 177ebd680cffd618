//! PostgreSQL-backed customer reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::CustomerField;
use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};

use super::diesel_helpers::{map_basic_diesel_error, map_pool_error_message};
use super::models::CustomerFieldRow;
use super::pool::{DbPool, PoolError};
use super::schema::customers;

/// Diesel-backed implementation of [`CustomerRepository`].
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    CustomerRepositoryError::connection(map_pool_error_message(error))
}

fn map_diesel_error(
    operation: &'static str,
) -> impl FnOnce(diesel::result::Error) -> CustomerRepositoryError {
    move |error| {
        map_basic_diesel_error(
            error,
            operation,
            CustomerRepositoryError::query,
            CustomerRepositoryError::connection,
        )
    }
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn list_fields(&self) -> Result<Vec<CustomerField>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = customers::table
            .select(CustomerFieldRow::as_select())
            .order((customers::name.asc(), customers::id.asc()))
            .load::<CustomerFieldRow>(&mut conn)
            .await
            .map_err(map_diesel_error("list customers"))?;

        Ok(rows.into_iter().map(CustomerField::from).collect())
    }

    async fn count(&self) -> Result<i64, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        customers::table
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel_error("count customers"))
    }
}
