//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Dashboard sign-in accounts.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Text,
        /// bcrypt hash.
        password -> Text,
    }
}

diesel::table! {
    customers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        image_url -> Varchar,
    }
}

diesel::table! {
    /// Invoices; `amount` is in cents and `status` is `pending` or `paid`.
    invoices (id) {
        id -> Uuid,
        customer_id -> Uuid,
        amount -> Int4,
        status -> Varchar,
        date -> Date,
    }
}

diesel::table! {
    /// Monthly revenue; `amount` maps the `revenue` column, in dollars.
    revenue (month) {
        month -> Varchar,
        #[sql_name = "revenue"]
        amount -> Int4,
    }
}

diesel::joinable!(invoices -> customers (customer_id));

diesel::allow_tables_to_appear_in_same_query!(customers, invoices, revenue, users);
