pub mod admin_user;
pub mod audit_log;
pub mod certificate;
pub mod feedback;
pub mod name_request;
pub mod otp_verification;
pub mod registration;
pub mod seminar;

pub mod prelude;
