//! Admin authentication middleware. Validates the session token and attaches
//! the decoded claims to the request for the authorization layer.

use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    http::{header::AUTHORIZATION, Method},
    web::Data,
    Error, HttpMessage, HttpResponse,
};
use certhub_common::jwt::decode_jwt;
use certhub_models::{
    constants::{ADMIN_SESSION_COOKIE, BEARER_TOKEN},
    domain::Claims,
    web::WebResponse,
};
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use std::{
    cell::RefCell,
    rc::Rc,
    task::{Context, Poll},
};

use crate::AppState;

/// Authentication middleware factory for the admin scope.
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service: Rc::new(RefCell::new(service)),
        })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = S::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        async move {
            // Fast path for OPTIONS requests
            if Method::OPTIONS == req.method() {
                return srv.call(req).await.map(|res| res.map_into_left_body());
            }

            let token = match extract_token(&req) {
                Some(token) => token,
                None => return Ok(unauthorized(req)),
            };

            let state = req
                .app_data::<Data<AppState>>()
                .ok_or_else(|| ErrorInternalServerError("Application state not configured"))?;
            let secret = state.settings.auth.jwt_secret.clone();

            let claims = match decode_jwt::<Claims>(&token, secret.as_bytes(), None) {
                Ok(td) => td.claims,
                Err(_) => return Ok(unauthorized(req)),
            };

            // Downstream handlers read the identity from extensions.
            req.extensions_mut().insert(claims);

            srv.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}

fn unauthorized<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(HttpResponse::Unauthorized().json(WebResponse::<()>::error(
        "Invalid session, please login again",
    )))
    .map_into_right_body()
}

/// The session token travels either as a bearer header (API clients) or as
/// the session cookie set at login (browser clients).
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(token) = extract_bearer_token(req) {
        return Some(token.to_string());
    }
    req.cookie(ADMIN_SESSION_COOKIE)
        .map(|c| c.value().to_string())
}

#[inline]
fn extract_bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_TOKEN)
        .map(str::trim)
}
