mod rate_limit;

pub mod migration;

pub use migration::Migrator;
pub use rate_limit::RateLimiter;
pub use sea_orm_migration::MigratorTrait;

use certhub_error::CertResult;
use certhub_models::settings::Db;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, instrument, log::LevelFilter};

#[instrument(name = "init_db", skip_all)]
/// Open the database connection pool described by the config section.
/// SQLite URLs with `mode=rwc` create the file on first run.
pub async fn init_db(config: &Db) -> CertResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(&config.url);
    opts.connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .idle_timeout(Duration::from_millis(config.idle_timeout_ms))
        .max_connections(config.max_connections);

    #[cfg(debug_assertions)]
    {
        opts.sqlx_logging(true)
            .sqlx_logging_level(LevelFilter::Info);
    }
    #[cfg(not(debug_assertions))]
    {
        opts.sqlx_logging(false)
            .sqlx_logging_level(LevelFilter::Off);
    }

    let db = Database::connect(opts).await?;
    info!("Successfully connected to database");

    Ok(db)
}
