//! Data access layer.
//!
//! Repositories are stateless namespaces of static async methods, each
//! taking the connection (or transaction) it should run against. Handlers
//! own the connection; repositories never reach for one themselves.

pub mod admin_user;
pub mod audit_log;
pub mod certificate;
pub mod feedback;
pub mod name_request;
pub mod otp;
pub mod registration;
pub mod seminar;

pub use admin_user::AdminUserRepository;
pub use audit_log::AuditLogRepository;
pub use certificate::CertificateRepository;
pub use feedback::FeedbackRepository;
pub use name_request::NameRequestRepository;
pub use otp::OtpRepository;
pub use registration::RegistrationRepository;
pub use seminar::SeminarRepository;
