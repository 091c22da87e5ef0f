use certhub_error::{otp::OtpError, CertResult};
use certhub_models::{
    constants::{OTP_EXPIRY_MINUTES, OTP_MAX_ATTEMPTS},
    entities::prelude::{OtpVerificationActiveModel, OtpVerificationModel},
    enums::OtpPurpose,
};
use certhub_repository::OtpRepository;
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ids::generate_otp_code;

/// One-time code issuance and verification.
///
/// Codes are scoped by (email, purpose, seminar context). Issuing replaces
/// any prior code for the same scope; verification is single-use and burns
/// the code after too many failed matches.
#[derive(Clone)]
pub struct OtpService {
    db: DatabaseConnection,
}

impl OtpService {
    pub fn new(db: DatabaseConnection) -> Self {
        OtpService { db }
    }

    /// Issue a fresh code for the scope, replacing any active one.
    pub async fn issue(
        &self,
        email: &str,
        purpose: OtpPurpose,
        seminar_id: Option<Uuid>,
    ) -> CertResult<OtpVerificationModel> {
        // Delete-before-insert keeps at most one active code per scope.
        OtpRepository::delete_for_key(email, purpose, seminar_id, &self.db).await?;

        let now = Utc::now();
        let model = OtpVerificationActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            otp_code: Set(generate_otp_code()),
            purpose: Set(purpose),
            seminar_id: Set(seminar_id),
            attempts: Set(0),
            verified: Set(false),
            expires_at: Set(now + Duration::minutes(OTP_EXPIRY_MINUTES)),
            created_at: Set(now),
        };
        let created = OtpRepository::create(model, &self.db).await?;
        debug!(email, purpose = %purpose, "issued verification code");
        Ok(created)
    }

    /// Check a submitted code against the active one for the scope.
    ///
    /// On success the row is marked verified, which makes it dead to any
    /// further checks (single use). Failed matches increment the attempt
    /// counter; once the cap is hit the row is deleted and the caller must
    /// request a new code.
    pub async fn verify(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
        seminar_id: Option<Uuid>,
    ) -> CertResult<OtpVerificationModel> {
        let Some(record) = OtpRepository::find_active(email, purpose, seminar_id, &self.db).await?
        else {
            return Err(OtpError::InvalidCode.into());
        };

        if record.expires_at < Utc::now() {
            OtpRepository::delete_by_id(record.id, &self.db).await?;
            return Err(OtpError::Expired.into());
        }

        if record.attempts >= OTP_MAX_ATTEMPTS {
            OtpRepository::delete_by_id(record.id, &self.db).await?;
            return Err(OtpError::TooManyAttempts.into());
        }

        if record.otp_code != code {
            let attempts = record.attempts + 1;
            let mut active: OtpVerificationActiveModel = record.into();
            active.attempts = Set(attempts);
            OtpRepository::update(active, &self.db).await?;
            if attempts >= OTP_MAX_ATTEMPTS {
                return Err(OtpError::TooManyAttempts.into());
            }
            return Err(OtpError::Mismatch.into());
        }

        let mut active: OtpVerificationActiveModel = record.into();
        active.verified = Set(true);
        let verified = OtpRepository::update(active, &self.db).await?;
        debug!(email, purpose = %purpose, "verification code accepted");
        Ok(verified)
    }

    /// Purge codes whose expiry has passed. Run periodically.
    pub async fn cleanup_expired(&self) -> CertResult<u64> {
        let removed = OtpRepository::delete_expired_before(Utc::now(), &self.db).await?;
        if removed > 0 {
            info!(removed, "purged expired verification codes");
        }
        Ok(removed)
    }
}
