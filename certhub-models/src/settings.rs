use config::{Config, File};
use serde::Deserialize;
use std::{ops::Deref, sync::Arc};

use certhub_error::CertResult;

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    /// Load configuration from an optional TOML file plus `CERTHUB__`
    /// environment overrides (e.g. `CERTHUB__WEB__PORT=8080`).
    pub fn new(config_path: String) -> CertResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("CERTHUB")
                    .separator("__")
                    .try_parsing(true),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub email: Email,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub auth: Auth,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Public origin used when composing absolute links in outbound emails
    /// (certificate download links and the like).
    #[serde(default = "General::base_url_default")]
    pub base_url: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            base_url: General::base_url_default(),
        }
    }
}

impl General {
    fn base_url_default() -> String {
        "http://localhost:8080".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default = "Web::workers_default")]
    pub workers: usize,
    #[serde(default)]
    pub rate_limit: RateLimit,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            host: Web::host_default(),
            port: Web::port_default(),
            workers: Web::workers_default(),
            rate_limit: Default::default(),
        }
    }
}

impl Web {
    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn port_default() -> u16 {
        8080
    }

    fn workers_default() -> usize {
        0 // 0 = one per CPU
    }

    pub fn worker_count(&self) -> usize {
        match self.workers {
            0 => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            n => n,
        }
    }
}

/// Sliding-window rate limit applied to the public endpoints, keyed by
/// client IP.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RateLimit {
    #[serde(default = "RateLimit::max_requests_default")]
    pub max_requests: u32,
    #[serde(default = "RateLimit::window_secs_default")]
    pub window_secs: u64,
}

impl Default for RateLimit {
    fn default() -> Self {
        RateLimit {
            max_requests: RateLimit::max_requests_default(),
            window_secs: RateLimit::window_secs_default(),
        }
    }
}

impl RateLimit {
    fn max_requests_default() -> u32 {
        10
    }

    fn window_secs_default() -> u64 {
        60
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Db {
    #[serde(default = "Db::url_default")]
    pub url: String,
    #[serde(default = "Db::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Db::connect_timeout_ms_default")]
    pub connect_timeout_ms: u64,
    #[serde(default = "Db::idle_timeout_ms_default")]
    pub idle_timeout_ms: u64,
}

impl Default for Db {
    fn default() -> Self {
        Db {
            url: Db::url_default(),
            max_connections: Db::max_connections_default(),
            connect_timeout_ms: Db::connect_timeout_ms_default(),
            idle_timeout_ms: Db::idle_timeout_ms_default(),
        }
    }
}

impl Db {
    fn url_default() -> String {
        "sqlite:certhub.db?mode=rwc".into()
    }

    fn max_connections_default() -> u32 {
        20
    }

    fn connect_timeout_ms_default() -> u64 {
        5000
    }

    fn idle_timeout_ms_default() -> u64 {
        60000
    }
}

/// Transactional email provider settings. The provider speaks a JSON HTTP
/// API; leaving `api_key` empty disables outbound mail.
#[derive(Debug, Clone, Deserialize)]
pub struct Email {
    #[serde(default = "Email::api_base_default")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "Email::sender_email_default")]
    pub sender_email: String,
    #[serde(default = "Email::sender_name_default")]
    pub sender_name: String,
}

impl Default for Email {
    fn default() -> Self {
        Email {
            api_base: Email::api_base_default(),
            api_key: Default::default(),
            sender_email: Email::sender_email_default(),
            sender_name: Email::sender_name_default(),
        }
    }
}

impl Email {
    fn api_base_default() -> String {
        "https://api.resend.com".into()
    }

    fn sender_email_default() -> String {
        "certificates@example.com".into()
    }

    fn sender_name_default() -> String {
        "Seminar Certificates".into()
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Object storage for rendered certificate PDFs. When disabled the PDFs
/// are still rendered and mailed, just not archived.
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    #[serde(default = "Storage::enabled_default")]
    pub enabled: bool,
    #[serde(default = "Storage::bucket_default")]
    pub bucket: String,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            enabled: Storage::enabled_default(),
            bucket: Storage::bucket_default(),
        }
    }
}

impl Storage {
    fn enabled_default() -> bool {
        false
    }

    fn bucket_default() -> String {
        "certhub-certificates".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    #[serde(default = "Auth::jwt_secret_default")]
    pub jwt_secret: String,
    #[serde(default = "Auth::token_ttl_hours_default")]
    pub token_ttl_hours: i64,
}

impl Default for Auth {
    fn default() -> Self {
        Auth {
            jwt_secret: Auth::jwt_secret_default(),
            token_ttl_hours: Auth::token_ttl_hours_default(),
        }
    }
}

impl Auth {
    fn jwt_secret_default() -> String {
        "certhub-dev-secret".into()
    }

    fn token_ttl_hours_default() -> i64 {
        24
    }
}
