//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed records the dashboard works with, the
//! validation applied to submitted forms, and the services that implement
//! the driving ports. Nothing here knows about HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Invoice, customer, revenue and user records.
//! - `invoice_form`: form validation producing an [`InvoiceDraft`].
//! - Services: [`InvoiceCommandService`], [`InvoiceQueryService`],
//!   [`DashboardService`], [`Seeder`].

pub mod auth;
pub mod currency;
pub mod customer;
pub mod dashboard;
pub mod dashboard_service;
pub mod error;
pub mod invoice;
pub mod invoice_form;
pub mod invoice_service;
pub mod ports;
pub mod revenue;
pub mod seeding;
mod store_failure;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError, RouteAccess, route_access};
pub use self::currency::format_currency;
pub use self::customer::{Customer, CustomerField, CustomerId};
pub use self::dashboard::{CardData, InvoiceTotals};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::invoice::{
    Cents, INVOICES_PER_PAGE, InvoiceDraft, InvoiceForm, InvoiceId, InvoiceRecord, InvoiceSearch,
    InvoiceStatus, InvoiceTableRow, LATEST_INVOICES_LIMIT, LatestInvoice, NewInvoice,
    UnknownInvoiceStatus,
};
pub use self::invoice_service::{InvoiceCommandService, InvoiceQueryService};
pub use self::revenue::Revenue;
pub use self::seeding::{SeedError, Seeder};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, User, UserAccount, UserId};
