use std::sync::Arc;

use certhub_delivery::{templates, Mailer};
use certhub_error::{CertError, CertResult};
use certhub_models::{
    constants::OTP_EXPIRY_MINUTES,
    domain::{OtpVerifyRequest, RegisterRequest, RegistrationSummary},
    entities::prelude::{RegistrationActiveModel, RegistrationModel, SeminarModel},
    enums::OtpPurpose,
};
use certhub_repository::{RegistrationRepository, SeminarRepository};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{is_unique_violation, OtpService};

/// Seminar sign-up flow: upsert the registration, then gate it behind an
/// emailed one-time code.
#[derive(Clone)]
pub struct RegistrationService {
    db: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    otp: OtpService,
}

impl RegistrationService {
    pub fn new(db: DatabaseConnection, mailer: Arc<dyn Mailer>) -> Self {
        let otp = OtpService::new(db.clone());
        RegistrationService { db, mailer, otp }
    }

    /// Register for a seminar and send the verification code.
    ///
    /// Re-registering with the same email before verifying updates the
    /// existing row and issues a fresh code instead of erroring; a verified
    /// registration conflicts. The email send is load-bearing here: without
    /// the code the registration can never be verified, so a send failure
    /// fails the whole request.
    pub async fn register(
        &self,
        seminar_id: Uuid,
        request: &RegisterRequest,
    ) -> CertResult<RegistrationSummary> {
        let seminar = self.bookable_seminar(seminar_id).await?;
        let email = request.normalized_email();

        let registration = match RegistrationRepository::find_by_seminar_and_email(
            seminar.id, &email, &self.db,
        )
        .await?
        {
            Some(existing) if existing.email_verified => {
                return Err(CertError::Conflict(
                    "You are already registered for this seminar.".into(),
                ));
            }
            Some(existing) => self.refresh_registration(existing, request).await?,
            None => match self.insert_registration(seminar.id, &email, request).await {
                Ok(created) => created,
                // Lost a concurrent race on the (seminar, email) index; the
                // other request's row is the registration now.
                Err(CertError::Storage(ref storage)) if is_unique_violation(storage) => {
                    RegistrationRepository::find_by_seminar_and_email(seminar.id, &email, &self.db)
                        .await?
                        .ok_or_else(|| CertError::NotFound("registration".into()))?
                }
                Err(e) => return Err(e),
            },
        };

        let otp = self
            .otp
            .issue(&email, OtpPurpose::Registration, Some(seminar.id))
            .await?;
        let message = templates::otp_email(
            &email,
            &otp.otp_code,
            "verify your seminar registration",
            OTP_EXPIRY_MINUTES,
        );
        self.mailer.send(&message).await?;

        info!(seminar_id = %seminar.id, email, "registration created, code sent");
        Ok(RegistrationSummary::from(&registration))
    }

    /// Confirm a registration with the emailed code.
    pub async fn verify(
        &self,
        seminar_id: Uuid,
        request: &OtpVerifyRequest,
    ) -> CertResult<RegistrationSummary> {
        let email = request.normalized_email();
        self.otp
            .verify(&email, &request.otp, OtpPurpose::Registration, Some(seminar_id))
            .await?;

        let registration =
            RegistrationRepository::find_by_seminar_and_email(seminar_id, &email, &self.db)
                .await?
                .ok_or_else(|| CertError::NotFound("registration".into()))?;

        let registration = if registration.email_verified {
            registration
        } else {
            let mut active: RegistrationActiveModel = registration.into();
            active.email_verified = Set(true);
            active.verified_at = Set(Some(Utc::now()));
            RegistrationRepository::update(active, &self.db).await?
        };

        // Confirmation mail is a courtesy; the registration is verified
        // either way.
        if let Some(seminar) = SeminarRepository::find_by_id(seminar_id, &self.db).await? {
            let message =
                templates::registration_confirmed(&email, &registration.full_name, &seminar);
            if let Err(e) = self.mailer.send(&message).await {
                warn!(email, error = %e, "confirmation email failed");
            }
        }

        info!(seminar_id = %seminar_id, email, "registration verified");
        Ok(RegistrationSummary::from(&registration))
    }

    async fn bookable_seminar(&self, seminar_id: Uuid) -> CertResult<SeminarModel> {
        let seminar = SeminarRepository::find_by_id(seminar_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))?;
        if !seminar.is_bookable() {
            return Err(CertError::Validation(
                "Registration is not open for this seminar.".into(),
            ));
        }
        Ok(seminar)
    }

    async fn insert_registration(
        &self,
        seminar_id: Uuid,
        email: &str,
        request: &RegisterRequest,
    ) -> CertResult<RegistrationModel> {
        let model = RegistrationActiveModel {
            id: Set(Uuid::new_v4()),
            seminar_id: Set(seminar_id),
            full_name: Set(request.full_name.trim().to_string()),
            email: Set(email.to_string()),
            phone: Set(request.phone.clone()),
            college_name: Set(request.college_name.clone()),
            year: Set(request.year.clone()),
            city_state: Set(request.city_state.clone()),
            email_verified: Set(false),
            attended: Set(false),
            registered_at: Set(Utc::now()),
            verified_at: Set(None),
        };
        Ok(RegistrationRepository::create(model, &self.db).await?)
    }

    /// Unverified re-registration: take the newest details, keep the row.
    async fn refresh_registration(
        &self,
        existing: RegistrationModel,
        request: &RegisterRequest,
    ) -> CertResult<RegistrationModel> {
        let mut active: RegistrationActiveModel = existing.into();
        active.full_name = Set(request.full_name.trim().to_string());
        active.phone = Set(request.phone.clone());
        active.college_name = Set(request.college_name.clone());
        active.year = Set(request.year.clone());
        active.city_state = Set(request.city_state.clone());
        active.registered_at = Set(Utc::now());
        Ok(RegistrationRepository::update(active, &self.db).await?)
    }
}
