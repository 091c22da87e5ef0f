pub use super::admin_user::{
    ActiveModel as AdminUserActiveModel, Column as AdminUserColumn, Entity as AdminUser,
    Model as AdminUserModel,
};
pub use super::audit_log::{
    ActiveModel as AuditLogActiveModel, Column as AuditLogColumn, Entity as AuditLog,
    Model as AuditLogModel,
};
pub use super::certificate::{
    ActiveModel as CertificateActiveModel, Column as CertificateColumn, Entity as Certificate,
    Model as CertificateModel,
};
pub use super::feedback::{
    ActiveModel as FeedbackActiveModel, Column as FeedbackColumn, Entity as Feedback,
    Model as FeedbackModel,
};
pub use super::name_request::{
    ActiveModel as NameRequestActiveModel, Column as NameRequestColumn, Entity as NameRequest,
    Model as NameRequestModel,
};
pub use super::otp_verification::{
    ActiveModel as OtpVerificationActiveModel, Column as OtpVerificationColumn,
    Entity as OtpVerification, Model as OtpVerificationModel,
};
pub use super::registration::{
    ActiveModel as RegistrationActiveModel, Column as RegistrationColumn, Entity as Registration,
    Model as RegistrationModel,
};
pub use super::seminar::{
    ActiveModel as SeminarActiveModel, Column as SeminarColumn, Entity as Seminar,
    Model as SeminarModel,
};
