/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "certhub.toml";

/// Cookie carrying the signed admin session token.
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Authorization header scheme for admin requests.
pub const BEARER_TOKEN: &str = "Bearer ";

/// One-time codes stay valid for this many minutes.
pub const OTP_EXPIRY_MINUTES: i64 = 10;

/// A code is burned after this many failed verification attempts.
pub const OTP_MAX_ATTEMPTS: i32 = 5;

/// Fan-out emails are sent in concurrent batches of this size so a large
/// seminar cannot exhaust outbound connections to the email provider.
pub const NOTIFY_BATCH_SIZE: usize = 5;

/// Failure lists in fan-out summaries are capped to keep responses small.
pub const FAILED_EMAILS_CAP: usize = 10;

/// Certificates (and dependent feedback/name requests) are retained this long.
pub const CERTIFICATE_RETENTION_DAYS: i64 = 30;

/// Audit log retention window.
pub const AUDIT_RETENTION_DAYS: i64 = 90;

/// Public certificate number prefix, e.g. `ZX-7KQ4M`.
pub const CERTIFICATE_ID_PREFIX: &str = "ZX-";

/// Alphabet for public certificate numbers. Excludes 0/O/1/I to keep the
/// printed id unambiguous.
pub const CERTIFICATE_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of the random part of a public certificate number.
pub const CERTIFICATE_ID_RANDOM_LEN: usize = 5;
