//! Session guard for the dashboard.
//!
//! Runs before any handler so unauthenticated requests under `/dashboard`
//! never reach a port. Must be wrapped inside the session middleware, which
//! has to run first to decode the cookie.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::auth::{LOGIN_PATH, PROTECTED_PREFIX};
use crate::domain::{RouteAccess, route_access};

use super::session::read_user_id;

/// Middleware applying [`route_access`] to every request.
///
/// Redirects use `303 See Other` so form posts are retried as `GET`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use invoice_dashboard::inbound::http::guard::RequireSession;
///
/// let _app = App::new().wrap(RequireSession);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

/// Service wrapper produced by [`RequireSession`].
pub struct RequireSessionMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let logged_in = match read_user_id(&req.get_session()) {
            Ok(user) => user.is_some(),
            Err(error) => {
                warn!(%error, "unreadable session treated as signed out");
                false
            }
        };

        // Decide on the percent-decoded path the router matches, not the raw URI.
        let target = match route_access(req.match_info().as_str(), logged_in) {
            RouteAccess::Allow => {
                let fut = self.service.call(req);
                return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
            }
            RouteAccess::RedirectToLogin => LOGIN_PATH,
            RouteAccess::RedirectToDashboard => PROTECTED_PREFIX,
        };

        debug!(path = %req.match_info().as_str(), target, "session guard redirect");
        let response = HttpResponse::SeeOther()
            .insert_header((LOCATION, target))
            .finish()
            .map_into_right_body();
        Box::pin(ready(Ok(req.into_response(response))))
    }
}
