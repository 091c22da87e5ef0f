//! Per-IP rate limiting for the public endpoints. Requests over the window
//! budget are rejected with 429 before reaching any handler.

use actix_service::{Service, Transform};
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
    web::Data,
    Error, HttpResponse,
};
use certhub_models::web::WebResponse;
use futures::{
    future::{ok, LocalBoxFuture, Ready},
    FutureExt,
};
use std::{
    cell::RefCell,
    rc::Rc,
    task::{Context, Poll},
};

use crate::{middleware::client_ip, AppState};

/// Rate limiting middleware factory.
pub struct RateLimit;

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RateLimitMiddleware {
            service: Rc::new(RefCell::new(service)),
        })
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<RefCell<S>>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
            let state = req
                .app_data::<Data<AppState>>()
                .ok_or_else(|| ErrorInternalServerError("Application state not configured"))?;

            let ip = client_ip(&req);
            if !state.rate_limiter.check(&ip).await {
                return Ok(req
                    .into_response(HttpResponse::TooManyRequests().json(
                        WebResponse::<()>::error("Too many requests. Please try again later."),
                    ))
                    .map_into_right_body());
            }

            srv.call(req).await.map(|res| res.map_into_left_body())
        }
        .boxed_local()
    }
}
