//! HTTP surface: public registration/certificate endpoints and the
//! authenticated admin API.
mod api;
mod middleware;
mod rbac;

use std::sync::Arc;

use actix_web::{
    dev::Server,
    middleware::{Compress, Logger, NormalizePath},
    web::{self, Data},
    App, HttpServer,
};
use certhub_core::{
    AuditService, CertificateService, NotifyService, OtpService, RegistrationService,
};
use certhub_delivery::{ArtifactStore, CertificateRenderer, Mailer};
use certhub_error::{CertError, CertResult};
use certhub_models::settings::Settings;
use certhub_storage::RateLimiter;
use sea_orm::DatabaseConnection;
use tracing::info;

/// Shared application state. Every collaborator is injected here once at
/// startup; handlers and middleware only ever see this struct.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub db: DatabaseConnection,
    pub registrations: RegistrationService,
    pub certificates: CertificateService,
    pub notify: NotifyService,
    pub otp: OtpService,
    pub audit: AuditService,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        settings: Settings,
        db: DatabaseConnection,
        mailer: Arc<dyn Mailer>,
        renderer: Arc<dyn CertificateRenderer>,
        artifacts: Arc<dyn ArtifactStore>,
    ) -> Self {
        let base_url = settings.general.base_url.trim_end_matches('/').to_string();
        AppState {
            registrations: RegistrationService::new(db.clone(), mailer.clone()),
            certificates: CertificateService::new(
                db.clone(),
                mailer.clone(),
                renderer,
                artifacts,
                base_url.clone(),
            ),
            notify: NotifyService::new(db.clone(), mailer, base_url),
            otp: OtpService::new(db.clone()),
            audit: AuditService::new(db.clone()),
            rate_limiter: RateLimiter::new(&settings.web.rate_limit),
            settings,
            db,
        }
    }
}

/// Build the configured HTTP server, bound and ready to run.
pub fn create_server(state: AppState) -> CertResult<Server> {
    let addr = format!("{}:{}", state.settings.web.host, state.settings.web.port);
    let worker_count = state.settings.web.worker_count();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Compress::default())
            .wrap(NormalizePath::trim())
            .configure(api::configure_health_routes)
            .service(web::scope("/api").configure(api::configure_routes))
    })
    .workers(worker_count)
    .bind(&addr)
    .map_err(|e| CertError::Msg(format!("Failed to bind HTTP server to {addr}: {e}")))?;

    info!(addr, workers = worker_count, "HTTP server bound");
    Ok(server.run())
}
