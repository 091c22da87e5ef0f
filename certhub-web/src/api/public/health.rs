use actix_web::{web, HttpResponse, Responder};

/// Liveness probe, mounted at the root scope so load balancers can reach it
/// without the API prefix.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
