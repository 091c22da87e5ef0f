pub mod certificate;
pub mod health;
pub mod registration;
pub mod seminar;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(seminar::ROUTER_PREFIX)
            .configure(seminar::configure_routes)
            .configure(registration::configure_routes)
            .configure(certificate::configure_seminar_routes),
    )
    .service(web::scope(certificate::ROUTER_PREFIX).configure(certificate::configure_routes));
}
