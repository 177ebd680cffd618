//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records live next
//! to the rows so that status parsing failures surface as query errors.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Int4, Text, Uuid as SqlUuid};
use uuid::Uuid;

use crate::domain::{
    Cents, Customer, CustomerField, CustomerId, InvoiceId, InvoiceRecord, InvoiceTableRow,
    PasswordHash, Revenue, UnknownInvoiceStatus, User, UserAccount, UserId,
};
use crate::domain::ports::SeedUser;

use super::schema::{customers, invoices, revenue, users};

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// Row struct for reading from the invoices table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvoiceRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
    pub date: NaiveDate,
}

impl TryFrom<InvoiceRow> for InvoiceRecord {
    type Error = UnknownInvoiceStatus;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::from_uuid(row.id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            amount: Cents::new(row.amount),
            status: row.status.parse()?,
            date: row.date,
        })
    }
}

/// Insertable struct for new invoices; the id is left to the database
/// unless seeding supplies one.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub(crate) struct NewInvoiceRow<'a> {
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: &'a str,
    pub date: NaiveDate,
}

/// Changeset applied by invoice edits. The date is deliberately absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub(crate) struct InvoiceUpdate<'a> {
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: &'a str,
}

/// Invoice joined with its customer, loaded either through the DSL
/// (positionally) or through raw search SQL (by column name).
#[derive(Debug, Clone, Queryable, QueryableByName)]
pub(crate) struct InvoiceListingRow {
    #[diesel(sql_type = SqlUuid)]
    pub id: Uuid,
    #[diesel(sql_type = SqlUuid)]
    pub customer_id: Uuid,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub email: String,
    #[diesel(sql_type = Text)]
    pub image_url: String,
    #[diesel(sql_type = Date)]
    pub date: NaiveDate,
    #[diesel(sql_type = Int4)]
    pub amount: i32,
    #[diesel(sql_type = Text)]
    pub status: String,
}

impl TryFrom<InvoiceListingRow> for InvoiceTableRow {
    type Error = UnknownInvoiceStatus;

    fn try_from(row: InvoiceListingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InvoiceId::from_uuid(row.id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            date: row.date,
            amount: row.amount,
            status: row.status.parse()?,
        })
    }
}

/// Single `count` column returned by raw counting SQL.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Paid and pending sums returned by the totals SQL.
#[derive(Debug, Clone, Copy, QueryableByName)]
pub(crate) struct StatusTotalsRow {
    #[diesel(sql_type = BigInt)]
    pub paid: i64,
    #[diesel(sql_type = BigInt)]
    pub pending: i64,
}

// ---------------------------------------------------------------------------
// Customers, revenue, users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerFieldRow {
    pub id: Uuid,
    pub name: String,
}

impl From<CustomerFieldRow> for CustomerField {
    fn from(row: CustomerFieldRow) -> Self {
        Self {
            id: CustomerId::from_uuid(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub image_url: &'a str,
}

impl<'a> From<&'a Customer> for NewCustomerRow<'a> {
    fn from(customer: &'a Customer) -> Self {
        Self {
            id: *customer.id.as_uuid(),
            name: customer.name.as_str(),
            email: customer.email.as_str(),
            image_url: customer.image_url.as_str(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = revenue)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RevenueRow {
    pub month: String,
    #[diesel(column_name = amount)]
    pub revenue: i32,
}

impl From<RevenueRow> for Revenue {
    fn from(row: RevenueRow) -> Self {
        Self {
            month: row.month,
            revenue: row.revenue,
        }
    }
}

impl From<&Revenue> for RevenueRow {
    fn from(value: &Revenue) -> Self {
        Self {
            month: value.month.clone(),
            revenue: value.revenue,
        }
    }
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: UserId::from_uuid(row.id),
                name: row.name,
                email: row.email,
            },
            password_hash: PasswordHash::new(row.password),
        }
    }
}

/// Insertable struct for seeded user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a SeedUser> for NewUserRow<'a> {
    fn from(user: &'a SeedUser) -> Self {
        Self {
            id: *user.id.as_uuid(),
            name: user.name.as_str(),
            email: user.email.as_str(),
            password: user.password_hash.as_str(),
        }
    }
}
