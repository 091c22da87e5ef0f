use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::prelude::{CertificateModel, SeminarModel};

/// Ask for a certificate claim code. Without a seminar id the claim applies
/// to the caller's most recent verified registration.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificateOtpRequest {
    #[validate(email)]
    pub email: String,
    pub seminar_id: Option<Uuid>,
}

impl CertificateOtpRequest {
    #[inline]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Submit the emailed claim code.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CertificateClaimRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub otp: String,
    pub seminar_id: Option<Uuid>,
}

/// Outcome of a certificate OTP verification.
///
/// `CertificateSent` is the idempotence branch: the existing artifact was
/// re-mailed and no new row was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateVerifyStatus {
    CertificateSent,
    NotRegistered,
    ProceedToFeedback,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerifyResponse {
    pub status: CertificateVerifyStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<super::RegistrationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seminar: Option<SeminarSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    pub certificate_id: String,
    pub recipient_name: String,
}

impl From<&CertificateModel> for CertificateSummary {
    fn from(m: &CertificateModel) -> Self {
        CertificateSummary {
            certificate_id: m.certificate_id.clone(),
            recipient_name: m.recipient_name.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeminarSummary {
    pub id: Uuid,
    pub title: String,
    pub speaker_name: Option<String>,
}

impl From<&SeminarModel> for SeminarSummary {
    fn from(m: &SeminarModel) -> Self {
        SeminarSummary {
            id: m.id,
            title: m.title.clone(),
            speaker_name: Some(m.speaker_name.clone()),
        }
    }
}

/// Admin name-correction listing filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameRequestListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<crate::enums::NameRequestStatus>,
}

impl NameRequestListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 200)
    }
}

/// Public verification view for a certificate number. Everything here is
/// printed on the certificate itself, so nothing sensitive is exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateVerification {
    pub certificate_id: String,
    pub recipient_name: String,
    pub seminar_title: String,
    pub seminar_date: chrono::NaiveDate,
    pub speaker_name: Option<String>,
    pub organization: Option<String>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&CertificateModel> for CertificateVerification {
    fn from(m: &CertificateModel) -> Self {
        CertificateVerification {
            certificate_id: m.certificate_id.clone(),
            recipient_name: m.recipient_name.clone(),
            seminar_title: m.seminar_title.clone(),
            seminar_date: m.seminar_date,
            speaker_name: m.speaker_name.clone(),
            organization: m.organization.clone(),
            generated_at: m.generated_at,
        }
    }
}

/// Post-seminar feedback submission. Acceptance is what triggers
/// certificate creation on the normal path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub college_name: Option<String>,
    pub year: Option<String>,
    pub city_state: Option<String>,
    pub career_interest: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub seminar_rating: Option<i16>,
    pub most_valuable_part: Option<String>,
    pub future_suggestions: Option<String>,
    #[serde(default)]
    pub interested_in_courses: bool,
    #[validate(length(min = 1, max = 200))]
    pub certificate_name: String,
    pub registration_id: Option<Uuid>,
    /// Required (min 10 chars) when certificate_name differs from the
    /// registered name.
    pub name_change_reason: Option<String>,
}

impl FeedbackRequest {
    #[inline]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// What a feedback submission produced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum FeedbackOutcome {
    /// Certificate created. `email_sent=false` means the artifact exists but
    /// delivery failed and staff should resend manually.
    CertificateIssued {
        certificate: CertificateSummary,
        email_sent: bool,
    },
    /// Printed name differed from the registration; a correction request was
    /// opened for admin review instead of issuing a certificate.
    NameChangeRequested,
}

/// Aggregate result of a notification fan-out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifySummary {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
    /// Capped sample of addresses that failed, for diagnosis.
    pub failed_emails: Vec<String>,
}

/// Per-kind deletion counts from the retention cleanup.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupSummary {
    pub certificates: u64,
    pub feedback: u64,
    pub name_requests: u64,
    pub artifacts: u64,
}
