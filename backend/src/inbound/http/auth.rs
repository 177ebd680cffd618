//! Login and logout handlers.
//!
//! ```text
//! POST /login   email=user@nextmail.com&password=123456
//! POST /logout
//! ```
//!
//! Both accept HTML form posts, so success is a `303 See Other` redirect.

use actix_web::http::header::LOCATION;
use actix_web::{Either, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::domain::auth::PROTECTED_PREFIX;
use crate::domain::ports::INVALID_CREDENTIALS;
use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message for login failures that are not a credential mismatch.
pub const LOGIN_FAILED: &str = "Something went wrong.";

/// Login request body, sent as a form or as JSON.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "user@nextmail.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
    /// Local path to land on after signing in; defaults to `/dashboard`.
    #[serde(default)]
    pub redirect_to: Option<String>,
}

/// Only same-origin absolute paths are honoured; anything else could send the
/// user to another site.
fn landing_path(requested: Option<&str>) -> &str {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => PROTECTED_PREFIX,
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body(
        content = LoginRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 303, description = "Signed in", headers(
            ("Set-Cookie" = String, description = "Session cookie"),
            ("Location" = String, description = "Landing page")
        )),
        (status = 400, description = "Malformed request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Something went wrong", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<Either<web::Form<LoginRequest>, web::Json<LoginRequest>>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let request = match payload {
        Ok(Either::Left(form)) => form.into_inner(),
        Ok(Either::Right(json)) => json.into_inner(),
        Err(err) => {
            debug!(error = %err, "unreadable login body");
            return Err(Error::invalid_request(LOGIN_FAILED));
        }
    };

    // Shape failures are indistinguishable from a wrong password.
    let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
        .map_err(|_| Error::unauthorized(INVALID_CREDENTIALS))?;

    // Unknown emails and wrong passwords arrive as the same 401; store
    // outages keep their 5xx code.
    let user = state.login.authenticate(&credentials).await?;

    if let Err(err) = session.persist_user(&user.id) {
        error!(error = %err, "failed to persist login session");
        // Built directly so the generic message survives internal redaction.
        return Ok(HttpResponse::InternalServerError().json(Error::internal(LOGIN_FAILED)));
    }

    info!(user_id = %user.id, "user signed in");
    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, landing_path(request.redirect_to.as_deref())))
        .finish())
}

/// End the session and return to the landing page.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Signed out", headers(
            ("Location" = String, description = "Landing page")
        ))
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::SeeOther()
        .insert_header((LOCATION, "/"))
        .finish()
}
