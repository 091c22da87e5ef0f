//! Route composition. Public endpoints sit behind the rate limiter; the
//! admin scope (everything except login) additionally requires a session.

pub mod admin;
pub mod public;

use actix_web::web;

use crate::middleware::{Authentication, RateLimit};

pub use public::health::configure_health_routes;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .configure(admin::configure_public_routes)
            .service(
                web::scope("")
                    .wrap(Authentication)
                    .configure(admin::configure_routes),
            ),
    )
    .service(
        web::scope("")
            .wrap(RateLimit)
            .configure(public::configure_routes),
    );
}
