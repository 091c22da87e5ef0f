use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_tables(manager).await?;
        create_indexes(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdminUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CertificateNameRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OtpVerifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Registrations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seminars::Table).to_owned())
            .await?;
        Ok(())
    }
}

async fn create_tables(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Seminars::Table)
                .if_not_exists()
                .col(ColumnDef::new(Seminars::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Seminars::Title).string().not_null())
                .col(ColumnDef::new(Seminars::Description).text())
                .col(ColumnDef::new(Seminars::Date).date().not_null())
                .col(ColumnDef::new(Seminars::Time).string().not_null())
                .col(ColumnDef::new(Seminars::Duration).string().not_null())
                .col(ColumnDef::new(Seminars::SpeakerName).string().not_null())
                .col(ColumnDef::new(Seminars::SpeakerTitle).string())
                .col(
                    ColumnDef::new(Seminars::LocationType)
                        .string_len(20)
                        .not_null(),
                )
                .col(ColumnDef::new(Seminars::VenueAddress).string())
                .col(ColumnDef::new(Seminars::MaxAttendees).integer())
                .col(ColumnDef::new(Seminars::OrganizationName).string().not_null())
                .col(ColumnDef::new(Seminars::ContactPerson).string().not_null())
                .col(ColumnDef::new(Seminars::ContactEmail).string().not_null())
                .col(ColumnDef::new(Seminars::ContactPhone).string())
                .col(ColumnDef::new(Seminars::Status).string_len(20).not_null())
                .col(
                    ColumnDef::new(Seminars::RegistrationEnabled)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(Seminars::CertificateEnabled)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(ColumnDef::new(Seminars::RejectionReason).string())
                .col(
                    ColumnDef::new(Seminars::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(Seminars::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(Seminars::ApprovedAt).timestamp_with_time_zone())
                .col(ColumnDef::new(Seminars::ApprovedBy).uuid())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Registrations::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Registrations::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(Registrations::SeminarId).uuid().not_null())
                .col(ColumnDef::new(Registrations::FullName).string().not_null())
                .col(ColumnDef::new(Registrations::Email).string().not_null())
                .col(ColumnDef::new(Registrations::Phone).string())
                .col(ColumnDef::new(Registrations::CollegeName).string())
                .col(ColumnDef::new(Registrations::Year).string())
                .col(ColumnDef::new(Registrations::CityState).string())
                .col(
                    ColumnDef::new(Registrations::EmailVerified)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(Registrations::Attended)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(Registrations::RegisteredAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(Registrations::VerifiedAt).timestamp_with_time_zone())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_registrations_seminar")
                        .from(Registrations::Table, Registrations::SeminarId)
                        .to(Seminars::Table, Seminars::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(OtpVerifications::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(OtpVerifications::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(OtpVerifications::Email).string().not_null())
                .col(ColumnDef::new(OtpVerifications::OtpCode).string().not_null())
                .col(
                    ColumnDef::new(OtpVerifications::Purpose)
                        .string_len(20)
                        .not_null(),
                )
                .col(ColumnDef::new(OtpVerifications::SeminarId).uuid())
                .col(
                    ColumnDef::new(OtpVerifications::Attempts)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .col(
                    ColumnDef::new(OtpVerifications::Verified)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(OtpVerifications::ExpiresAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(OtpVerifications::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Certificates::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Certificates::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(Certificates::RegistrationId).uuid())
                .col(ColumnDef::new(Certificates::FeedbackId).uuid())
                .col(ColumnDef::new(Certificates::SeminarId).uuid().not_null())
                .col(
                    ColumnDef::new(Certificates::CertificateId)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(Certificates::RecipientName).string().not_null())
                .col(
                    ColumnDef::new(Certificates::RecipientEmail)
                        .string()
                        .not_null(),
                )
                .col(ColumnDef::new(Certificates::SeminarTitle).string().not_null())
                .col(ColumnDef::new(Certificates::SeminarDate).date().not_null())
                .col(ColumnDef::new(Certificates::SpeakerName).string())
                .col(ColumnDef::new(Certificates::Organization).string())
                .col(
                    ColumnDef::new(Certificates::DownloadCount)
                        .integer()
                        .not_null()
                        .default(0),
                )
                .col(
                    ColumnDef::new(Certificates::GeneratedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(Certificates::LastDownloadedAt).timestamp_with_time_zone())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_certificates_seminar")
                        .from(Certificates::Table, Certificates::SeminarId)
                        .to(Seminars::Table, Seminars::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(Feedback::Table)
                .if_not_exists()
                .col(ColumnDef::new(Feedback::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Feedback::RegistrationId).uuid())
                .col(ColumnDef::new(Feedback::SeminarId).uuid().not_null())
                .col(ColumnDef::new(Feedback::FullName).string().not_null())
                .col(ColumnDef::new(Feedback::Email).string().not_null())
                .col(ColumnDef::new(Feedback::CollegeName).string())
                .col(ColumnDef::new(Feedback::Year).string())
                .col(ColumnDef::new(Feedback::CityState).string())
                .col(ColumnDef::new(Feedback::CareerInterest).string())
                .col(ColumnDef::new(Feedback::SeminarRating).small_integer())
                .col(ColumnDef::new(Feedback::MostValuablePart).text())
                .col(ColumnDef::new(Feedback::FutureSuggestions).text())
                .col(
                    ColumnDef::new(Feedback::InterestedInCourses)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(ColumnDef::new(Feedback::CertificateName).string().not_null())
                .col(
                    ColumnDef::new(Feedback::SubmittedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_feedback_seminar")
                        .from(Feedback::Table, Feedback::SeminarId)
                        .to(Seminars::Table, Seminars::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(CertificateNameRequests::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(CertificateNameRequests::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::FeedbackId)
                        .uuid()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::SeminarId)
                        .uuid()
                        .not_null(),
                )
                .col(ColumnDef::new(CertificateNameRequests::RegistrationId).uuid())
                .col(
                    ColumnDef::new(CertificateNameRequests::Email)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::RegisteredName)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::RequestedName)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::Reason)
                        .string()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(CertificateNameRequests::Status)
                        .string_len(20)
                        .not_null(),
                )
                .col(ColumnDef::new(CertificateNameRequests::AdminNotes).string())
                .col(
                    ColumnDef::new(CertificateNameRequests::ReviewedAt)
                        .timestamp_with_time_zone(),
                )
                .col(ColumnDef::new(CertificateNameRequests::ReviewedBy).uuid())
                .col(
                    ColumnDef::new(CertificateNameRequests::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_name_requests_seminar")
                        .from(
                            CertificateNameRequests::Table,
                            CertificateNameRequests::SeminarId,
                        )
                        .to(Seminars::Table, Seminars::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_name_requests_feedback")
                        .from(
                            CertificateNameRequests::Table,
                            CertificateNameRequests::FeedbackId,
                        )
                        .to(Feedback::Table, Feedback::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AdminUsers::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(AdminUsers::Id)
                        .uuid()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(AdminUsers::Email).string().not_null())
                .col(ColumnDef::new(AdminUsers::PasswordHash).string().not_null())
                .col(ColumnDef::new(AdminUsers::Name).string())
                .col(ColumnDef::new(AdminUsers::Role).string_len(20).not_null())
                .col(
                    ColumnDef::new(AdminUsers::IsActive)
                        .boolean()
                        .not_null()
                        .default(true),
                )
                .col(ColumnDef::new(AdminUsers::CreatedBy).uuid())
                .col(
                    ColumnDef::new(AdminUsers::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(
                    ColumnDef::new(AdminUsers::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(AuditLogs::Table)
                .if_not_exists()
                .col(ColumnDef::new(AuditLogs::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(AuditLogs::AdminId).uuid().not_null())
                .col(ColumnDef::new(AuditLogs::AdminEmail).string().not_null())
                .col(
                    ColumnDef::new(AuditLogs::AdminRole)
                        .string_len(20)
                        .not_null(),
                )
                .col(ColumnDef::new(AuditLogs::Action).string_len(20).not_null())
                .col(ColumnDef::new(AuditLogs::Resource).string().not_null())
                .col(ColumnDef::new(AuditLogs::ResourceId).string())
                .col(ColumnDef::new(AuditLogs::Details).json())
                .col(ColumnDef::new(AuditLogs::IpAddress).string())
                .col(ColumnDef::new(AuditLogs::UserAgent).string())
                .col(
                    ColumnDef::new(AuditLogs::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .to_owned(),
        )
        .await?;

    Ok(())
}

/// Unique indexes are the authoritative duplicate guards for registration,
/// certificate, and feedback rows; application-level checks are only a fast
/// path in front of these.
async fn create_indexes(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_index(
            Index::create()
                .name("idx_registrations_seminar_email")
                .table(Registrations::Table)
                .col(Registrations::SeminarId)
                .col(Registrations::Email)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_certificates_seminar_recipient")
                .table(Certificates::Table)
                .col(Certificates::SeminarId)
                .col(Certificates::RecipientEmail)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_certificates_certificate_id")
                .table(Certificates::Table)
                .col(Certificates::CertificateId)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_feedback_seminar_email")
                .table(Feedback::Table)
                .col(Feedback::SeminarId)
                .col(Feedback::Email)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_admin_users_email")
                .table(AdminUsers::Table)
                .col(AdminUsers::Email)
                .unique()
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_otp_email_purpose")
                .table(OtpVerifications::Table)
                .col(OtpVerifications::Email)
                .col(OtpVerifications::Purpose)
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .name("idx_audit_logs_created_at")
                .table(AuditLogs::Table)
                .col(AuditLogs::CreatedAt)
                .to_owned(),
        )
        .await?;

    Ok(())
}

#[derive(DeriveIden)]
enum Seminars {
    Table,
    Id,
    Title,
    Description,
    Date,
    Time,
    Duration,
    SpeakerName,
    SpeakerTitle,
    LocationType,
    VenueAddress,
    MaxAttendees,
    OrganizationName,
    ContactPerson,
    ContactEmail,
    ContactPhone,
    Status,
    RegistrationEnabled,
    CertificateEnabled,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
    ApprovedAt,
    ApprovedBy,
}

#[derive(DeriveIden)]
enum Registrations {
    Table,
    Id,
    SeminarId,
    FullName,
    Email,
    Phone,
    CollegeName,
    Year,
    CityState,
    EmailVerified,
    Attended,
    RegisteredAt,
    VerifiedAt,
}

#[derive(DeriveIden)]
enum OtpVerifications {
    Table,
    Id,
    Email,
    OtpCode,
    Purpose,
    SeminarId,
    Attempts,
    Verified,
    ExpiresAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Certificates {
    Table,
    Id,
    RegistrationId,
    FeedbackId,
    SeminarId,
    CertificateId,
    RecipientName,
    RecipientEmail,
    SeminarTitle,
    SeminarDate,
    SpeakerName,
    Organization,
    DownloadCount,
    GeneratedAt,
    LastDownloadedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    RegistrationId,
    SeminarId,
    FullName,
    Email,
    CollegeName,
    Year,
    CityState,
    CareerInterest,
    SeminarRating,
    MostValuablePart,
    FutureSuggestions,
    InterestedInCourses,
    CertificateName,
    SubmittedAt,
}

#[derive(DeriveIden)]
enum CertificateNameRequests {
    Table,
    Id,
    FeedbackId,
    SeminarId,
    RegistrationId,
    Email,
    RegisteredName,
    RequestedName,
    Reason,
    Status,
    AdminNotes,
    ReviewedAt,
    ReviewedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AdminUsers {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    IsActive,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    AdminId,
    AdminEmail,
    AdminRole,
    Action,
    Resource,
    ResourceId,
    Details,
    IpAddress,
    UserAgent,
    CreatedAt,
}
