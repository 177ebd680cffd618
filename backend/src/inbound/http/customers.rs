//! Customer picker data.

use actix_web::{HttpResponse, get, web};

use crate::domain::{CustomerField, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;

/// Id and name of every customer, ordered by name.
#[utoipa::path(
    get,
    path = "/dashboard/customers",
    responses(
        (status = 200, description = "Customers", body = [CustomerField]),
        (status = 500, description = "Failed to fetch all customers.", body = Error)
    ),
    tags = ["customers"],
    operation_id = "fetchCustomers"
)]
#[get("/dashboard/customers")]
pub async fn list_customers(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let customers = state.invoices_query.customers().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(customers))
}
