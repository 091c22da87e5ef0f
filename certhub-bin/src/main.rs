use std::{env::current_dir, path::PathBuf, sync::Arc};

use clap::Parser;
use sea_orm::{ActiveValue::Set, DatabaseConnection};

use certhub_common::{hash::bcrypt_hash, logger::Logger};
use certhub_delivery::{
    ArtifactStore, NullArtifactStore, PdfCertificateRenderer, ResendMailer, S3ArtifactStore,
};
use certhub_error::{CertError, CertResult};
use certhub_models::{
    constants::DEFAULT_CONFIG_FILE_NAME, entities::prelude::AdminUserActiveModel,
    enums::Role, settings::Settings,
};
use certhub_repository::AdminUserRepository;
use certhub_storage::{init_db, Migrator, MigratorTrait};
use certhub_web::{create_server, AppState};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// CertHub - seminar registration and certificate backend
///
/// Handles OTP-verified seminar registrations, feedback-gated certificate
/// issuance, name-correction review, and the admin console API.
#[derive(Parser)]
#[command(name = "certhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CertHub", long_about = None)]
struct Cli {
    /// Sets a custom config file with full path
    ///
    /// If not specified, the server looks for 'certhub.toml' in the current
    /// working directory.
    #[arg(short, long, env = "CERTHUB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> CertResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(p) => p,
        None => {
            let dir = current_dir()
                .map_err(|e| CertError::from(format!("Failed to get current directory: {e}")))?;
            dir.join(DEFAULT_CONFIG_FILE_NAME)
        }
    };

    let settings = Settings::new(config_path.to_string_lossy().to_string())?;

    let mut logger = Logger::new(None);
    logger.initialize()?;

    let db = init_db(&settings.db).await?;
    Migrator::up(&db, None).await.map_err(CertError::from)?;
    info!("database ready");

    seed_initial_admin(&db).await?;

    let mailer = Arc::new(ResendMailer::new(&settings.email));
    if !settings.email.is_configured() {
        warn!("email API key not set; outbound mail will fail until configured");
    }

    let artifacts: Arc<dyn ArtifactStore> = if settings.storage.enabled {
        Arc::new(S3ArtifactStore::new(settings.storage.bucket.clone()).await)
    } else {
        Arc::new(NullArtifactStore)
    };

    let state = AppState::new(
        settings,
        db,
        mailer,
        Arc::new(PdfCertificateRenderer),
        artifacts,
    );

    let server = create_server(state)?;
    server
        .await
        .map_err(|e| CertError::from(format!("HTTP server failed: {e}")))
}

/// Bootstrap a super admin when the accounts table is empty. Credentials
/// come from the environment so they never land in the config file.
async fn seed_initial_admin(db: &DatabaseConnection) -> CertResult<()> {
    if !AdminUserRepository::find_all(db).await?.is_empty() {
        return Ok(());
    }

    let (email, password) = match (
        std::env::var("CERTHUB_ADMIN_EMAIL"),
        std::env::var("CERTHUB_ADMIN_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email.trim().to_lowercase(), password),
        _ => {
            warn!(
                "no admin accounts exist; set CERTHUB_ADMIN_EMAIL and \
                 CERTHUB_ADMIN_PASSWORD to bootstrap one"
            );
            return Ok(());
        }
    };

    let now = Utc::now();
    let admin = AdminUserActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.clone()),
        password_hash: Set(bcrypt_hash(&password)),
        name: Set(None),
        role: Set(Role::SuperAdmin),
        is_active: Set(true),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    AdminUserRepository::create(admin, db).await?;
    info!(email, "bootstrapped initial super admin");
    Ok(())
}
