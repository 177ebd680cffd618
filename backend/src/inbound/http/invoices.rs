//! Invoice table and invoice form handlers.
//!
//! ```text
//! GET    /dashboard/invoices?query=lee&page=2
//! POST   /dashboard/invoices          customerId=..&amount=12.34&status=paid
//! GET    /dashboard/invoices/{id}
//! PUT    /dashboard/invoices/{id}     customerId=..&amount=12.34&status=paid
//! DELETE /dashboard/invoices/{id}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{Either, HttpResponse, delete, get, post, put, web};
use futures_util::try_join;
use pagination::PageNumber;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::invoice_form::InvoiceFormInput;
use crate::domain::ports::INVOICES_LISTING_PATH;
use crate::domain::{CustomerField, Error, InvoiceForm, InvoiceId, InvoiceSearch, InvoiceTableRow};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;

const INVOICE_NOT_FOUND: &str = "Invoice not found.";

/// Query string of the invoices table.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InvoiceListParams {
    /// Case-insensitive text matched against customer, amount, date and status.
    #[serde(default)]
    pub query: Option<String>,
    /// 1-based page; defaults to the first page.
    #[serde(default)]
    pub page: Option<u32>,
}

impl InvoiceListParams {
    fn into_search(self) -> Result<InvoiceSearch, Error> {
        let page = match self.page {
            Some(raw) => PageNumber::new(raw).map_err(|err| Error::invalid_request(err.to_string()))?,
            None => PageNumber::FIRST,
        };
        Ok(InvoiceSearch::new(self.query.unwrap_or_default(), page))
    }
}

/// One page of the invoices table.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePage {
    pub invoices: Vec<InvoiceTableRow>,
    pub query: String,
    pub page: u32,
    pub total_pages: u64,
}

/// Everything the edit form needs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditInvoice {
    pub invoice: InvoiceForm,
    pub customers: Vec<CustomerField>,
}

type InvoicePayload =
    Result<Either<web::Form<InvoiceFormInput>, web::Json<InvoiceFormInput>>, actix_web::Error>;

/// An unreadable body is treated like an empty form so the caller still gets
/// the per-field messages.
fn form_input(payload: InvoicePayload) -> InvoiceFormInput {
    match payload {
        Ok(Either::Left(form)) => form.into_inner(),
        Ok(Either::Right(json)) => json.into_inner(),
        Err(err) => {
            debug!(error = %err, "unreadable invoice form");
            InvoiceFormInput::default()
        }
    }
}

/// Malformed ids cannot name a stored invoice, so they read as "not found".
fn parse_id(raw: &str) -> Result<InvoiceId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(INVOICE_NOT_FOUND))
}

fn back_to_listing() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, INVOICES_LISTING_PATH))
        .finish()
}

/// Filtered, paginated invoices with the total page count.
#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    params(InvoiceListParams),
    responses(
        (status = 200, description = "Invoice page", body = InvoicePage),
        (status = 400, description = "Invalid page", body = Error),
        (status = 500, description = "Failed to fetch invoices", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "listInvoices"
)]
#[get("/dashboard/invoices")]
pub async fn list_invoices(
    state: web::Data<HttpState>,
    params: Result<web::Query<InvoiceListParams>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let params = params.map_err(|err| Error::invalid_request(err.to_string()))?;
    let search = params.into_inner().into_search()?;
    let (invoices, total_pages) = try_join!(
        state.invoices_query.filtered_invoices(&search),
        state.invoices_query.invoice_pages(&search.query),
    )?;

    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(InvoicePage {
            invoices,
            query: search.query,
            page: search.page.get(),
            total_pages,
        }))
}

/// Create an invoice dated today.
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; back to the listing"),
        (status = 400, description = "Validation failed", body = Error),
        (status = 500, description = "Database Error: Failed to Create Invoice.", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/dashboard/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    payload: InvoicePayload,
) -> ApiResult<HttpResponse> {
    state.invoices.create(&form_input(payload)).await?;
    Ok(back_to_listing())
}

/// Stored invoice and the customer list for the edit form.
#[utoipa::path(
    get,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice UUID")),
    responses(
        (status = 200, description = "Edit form data", body = EditInvoice),
        (status = 404, description = "Invoice not found", body = Error),
        (status = 500, description = "Failed to fetch invoice", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "getInvoice"
)]
#[get("/dashboard/invoices/{id}")]
pub async fn get_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let (invoice, customers) = try_join!(
        state.invoices_query.invoice_by_id(&id),
        state.invoices_query.customers(),
    )?;
    let invoice = invoice.ok_or_else(|| Error::not_found(INVOICE_NOT_FOUND))?;

    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(EditInvoice { invoice, customers }))
}

/// Replace an invoice's customer, amount and status.
#[utoipa::path(
    put,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice UUID")),
    request_body(content = InvoiceFormInput, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; back to the listing"),
        (status = 400, description = "Validation failed", body = Error),
        (status = 404, description = "Malformed invoice id", body = Error),
        (status = 500, description = "Database Error: Failed to Update Invoice.", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[put("/dashboard/invoices/{id}")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: InvoicePayload,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.invoices.update(&id, &form_input(payload)).await?;
    Ok(back_to_listing())
}

/// Delete an invoice; deleting an absent invoice succeeds.
#[utoipa::path(
    delete,
    path = "/dashboard/invoices/{id}",
    params(("id" = String, Path, description = "Invoice UUID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Malformed invoice id", body = Error),
        (status = 500, description = "Database Error: Failed to Delete Invoice.", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "deleteInvoice"
)]
#[delete("/dashboard/invoices/{id}")]
pub async fn delete_invoice(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    state.invoices.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
