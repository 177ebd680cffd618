//! PostgreSQL-backed monthly revenue reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::Revenue;
use crate::domain::ports::{RevenueRepository, RevenueRepositoryError};

use super::diesel_helpers::{map_basic_diesel_error, map_pool_error_message};
use super::models::RevenueRow;
use super::pool::DbPool;
use super::schema::revenue;

/// Diesel-backed implementation of [`RevenueRepository`].
#[derive(Clone)]
pub struct DieselRevenueRepository {
    pool: DbPool,
}

impl DieselRevenueRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevenueRepository for DieselRevenueRepository {
    async fn list(&self) -> Result<Vec<Revenue>, RevenueRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| RevenueRepositoryError::connection(map_pool_error_message(err)))?;

        // Rows come back in storage order; the chart labels carry the month.
        let rows = revenue::table
            .select(RevenueRow::as_select())
            .load::<RevenueRow>(&mut conn)
            .await
            .map_err(|err| {
                map_basic_diesel_error(
                    err,
                    "list revenue",
                    RevenueRepositoryError::query,
                    RevenueRepositoryError::connection,
                )
            })?;

        Ok(rows.into_iter().map(Revenue::from).collect())
    }
}
