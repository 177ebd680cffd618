//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint from the inbound layer together
//! with the schemas they exchange, and declares the session cookie security
//! scheme. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::invoice_form::InvoiceFormInput;
use crate::domain::{
    CardData, CustomerField, Error, ErrorCode, InvoiceForm, InvoiceStatus, InvoiceTableRow,
    LatestInvoice, Revenue,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::invoices::{EditInvoice, InvoicePage};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Invoice dashboard API",
        description = "Session-authenticated invoice, customer and revenue endpoints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboard::revenue,
        crate::inbound::http::dashboard::latest_invoices,
        crate::inbound::http::dashboard::cards,
        crate::inbound::http::invoices::list_invoices,
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::get_invoice,
        crate::inbound::http::invoices::update_invoice,
        crate::inbound::http::invoices::delete_invoice,
        crate::inbound::http::customers::list_customers,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        InvoiceFormInput,
        InvoiceStatus,
        InvoiceTableRow,
        InvoiceForm,
        InvoicePage,
        EditInvoice,
        LatestInvoice,
        CardData,
        Revenue,
        CustomerField,
    )),
    tags(
        (name = "auth", description = "Sign in and sign out"),
        (name = "dashboard", description = "Overview page panels"),
        (name = "invoices", description = "Invoice table and forms"),
        (name = "customers", description = "Customer picker"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
