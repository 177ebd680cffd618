//! Overview page panels: revenue chart, latest invoices and headline cards.

use actix_web::{HttpResponse, get, web};

use crate::domain::{CardData, Error, LatestInvoice, Revenue};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::state::HttpState;

/// Revenue per month, in storage order.
#[utoipa::path(
    get,
    path = "/dashboard/revenue",
    responses(
        (status = 200, description = "Monthly revenue", body = [Revenue]),
        (status = 500, description = "Failed to fetch revenue data.", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "fetchRevenue"
)]
#[get("/dashboard/revenue")]
pub async fn revenue(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rows = state.dashboard.revenue().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(rows))
}

/// The five most recent invoices with formatted amounts.
#[utoipa::path(
    get,
    path = "/dashboard/latest-invoices",
    responses(
        (status = 200, description = "Latest invoices", body = [LatestInvoice]),
        (status = 500, description = "Failed to fetch the latest invoices.", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "fetchLatestInvoices"
)]
#[get("/dashboard/latest-invoices")]
pub async fn latest_invoices(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rows = state.dashboard.latest_invoices().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(rows))
}

/// Invoice and customer counts plus paid and pending totals.
#[utoipa::path(
    get,
    path = "/dashboard/cards",
    responses(
        (status = 200, description = "Card figures", body = CardData),
        (status = 500, description = "Failed to fetch card data.", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "fetchCardData"
)]
#[get("/dashboard/cards")]
pub async fn cards(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let card_data = state.dashboard.card_data().await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(card_data))
}
