//! PostgreSQL-backed placeholder seeding.
//!
//! Every table is written inside one transaction. Rows whose primary key (or,
//! for users, email) already exists are skipped, so the reported counts only
//! include rows that were actually new.

use async_trait::async_trait;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SeedCounts, SeedData, SeedRepository, SeedRepositoryError};

use super::diesel_helpers::{map_basic_diesel_error, map_pool_error_message};
use super::models::{NewCustomerRow, NewInvoiceRow, NewUserRow, RevenueRow};
use super::pool::DbPool;
use super::schema::{customers, invoices, revenue, users};

/// Diesel-backed implementation of [`SeedRepository`].
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a seeding repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn seed(&self, data: &SeedData) -> Result<SeedCounts, SeedRepositoryError> {
        let user_rows: Vec<NewUserRow<'_>> = data.users.iter().map(NewUserRow::from).collect();
        let customer_rows: Vec<NewCustomerRow<'_>> =
            data.customers.iter().map(NewCustomerRow::from).collect();
        let invoice_rows: Vec<NewInvoiceRow<'_>> = data
            .invoices
            .iter()
            .map(|invoice| NewInvoiceRow {
                id: Some(*invoice.id.as_uuid()),
                customer_id: *invoice.customer_id.as_uuid(),
                amount: invoice.amount.get(),
                status: invoice.status.as_str(),
                date: invoice.date,
            })
            .collect();
        let revenue_rows: Vec<RevenueRow> = data.revenue.iter().map(RevenueRow::from).collect();

        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| SeedRepositoryError::connection(map_pool_error_message(err)))?;

        conn.transaction(|conn| {
            async move {
                let users = diesel::insert_into(users::table)
                    .values(&user_rows)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;

                // Customers go in before invoices so the foreign key holds.
                let customers = diesel::insert_into(customers::table)
                    .values(&customer_rows)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;

                let invoices = diesel::insert_into(invoices::table)
                    .values(&invoice_rows)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;

                let revenue = diesel::insert_into(revenue::table)
                    .values(&revenue_rows)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;

                Ok(SeedCounts {
                    users,
                    customers,
                    invoices,
                    revenue,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| {
            map_basic_diesel_error(
                err,
                "seed placeholder data",
                SeedRepositoryError::query,
                SeedRepositoryError::connection,
            )
        })
    }
}
