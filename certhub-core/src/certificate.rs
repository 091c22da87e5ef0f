use std::sync::Arc;

use certhub_delivery::{templates, ArtifactStore, CertificateRenderer, Mailer};
use certhub_error::{CertError, CertResult};
use certhub_models::{
    constants::{CERTIFICATE_RETENTION_DAYS, OTP_EXPIRY_MINUTES},
    domain::{
        CertificateSummary, CertificateVerifyResponse, CertificateVerifyStatus, CleanupSummary,
        FeedbackOutcome, FeedbackRequest, OtpVerifyRequest, RegistrationSummary, SeminarSummary,
    },
    entities::prelude::{
        CertificateActiveModel, CertificateModel, FeedbackActiveModel, FeedbackModel,
        NameRequestActiveModel, NameRequestModel, RegistrationActiveModel, RegistrationModel,
        SeminarModel,
    },
    enums::{NameRequestStatus, OtpPurpose},
};
use certhub_repository::{
    CertificateRepository, FeedbackRepository, NameRequestRepository, RegistrationRepository,
    SeminarRepository,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveValue::Set, DatabaseConnection};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ids, is_unique_violation, names_match, OtpService};

/// Certificate issuance and everything downstream of it: the OTP-gated
/// claim flow, feedback-triggered generation, name-correction review, and
/// retention cleanup.
#[derive(Clone)]
pub struct CertificateService {
    db: DatabaseConnection,
    mailer: Arc<dyn Mailer>,
    renderer: Arc<dyn CertificateRenderer>,
    artifacts: Arc<dyn ArtifactStore>,
    base_url: String,
    otp: OtpService,
}

impl CertificateService {
    pub fn new(
        db: DatabaseConnection,
        mailer: Arc<dyn Mailer>,
        renderer: Arc<dyn CertificateRenderer>,
        artifacts: Arc<dyn ArtifactStore>,
        base_url: String,
    ) -> Self {
        let otp = OtpService::new(db.clone());
        CertificateService {
            db,
            mailer,
            renderer,
            artifacts,
            base_url,
            otp,
        }
    }

    /// Request a certificate claim code.
    ///
    /// The registration check runs first: no registration row means no code
    /// is created and nothing is sent, so unregistered addresses never
    /// receive email. The claim is refused while the registration's seminar
    /// has certificates disabled, whether or not a seminar id was supplied.
    pub async fn request_otp(&self, email: &str, seminar_id: Option<Uuid>) -> CertResult<()> {
        let email = email.trim().to_lowercase();

        match seminar_id {
            Some(id) => {
                self.claimable_seminar(id).await?;
                RegistrationRepository::find_by_seminar_and_email(id, &email, &self.db)
                    .await?
                    .ok_or_else(|| CertError::NotFound("registration".into()))?;
            }
            None => {
                let registration =
                    RegistrationRepository::find_latest_verified_by_email(&email, &self.db)
                        .await?
                        .ok_or_else(|| CertError::NotFound("registration".into()))?;
                self.claimable_seminar(registration.seminar_id).await?;
            }
        }

        let otp = self
            .otp
            .issue(&email, OtpPurpose::Certificate, seminar_id)
            .await?;
        let message = templates::otp_email(
            &email,
            &otp.otp_code,
            "claim your participation certificate",
            OTP_EXPIRY_MINUTES,
        );
        self.mailer.send(&message).await?;

        info!(email, "certificate claim code sent");
        Ok(())
    }

    /// Verify a claim code and route the caller to the right next step:
    /// resend an existing certificate, send them to the feedback form, or
    /// tell them they were never registered.
    pub async fn verify_otp(
        &self,
        request: &OtpVerifyRequest,
        seminar_id: Option<Uuid>,
    ) -> CertResult<CertificateVerifyResponse> {
        let email = request.normalized_email();
        self.otp
            .verify(&email, &request.otp, OtpPurpose::Certificate, seminar_id)
            .await?;

        // Idempotence branch: a certificate already exists, so re-mail it
        // instead of issuing another.
        if let Some(certificate) = self.find_certificate(&email, seminar_id).await? {
            let summary = CertificateSummary::from(&certificate);
            if let Err(e) = self.deliver(&certificate).await {
                warn!(certificate_id = %certificate.certificate_id, error = %e, "resend failed");
            }
            return Ok(CertificateVerifyResponse {
                status: CertificateVerifyStatus::CertificateSent,
                message: "Your certificate has been sent to your email.".into(),
                certificate: Some(summary),
                registration: None,
                seminar: None,
            });
        }

        let Some(registration) = self.find_registration(&email, seminar_id).await? else {
            return Ok(CertificateVerifyResponse {
                status: CertificateVerifyStatus::NotRegistered,
                message: "No registration was found for this email.".into(),
                certificate: None,
                registration: None,
                seminar: None,
            });
        };

        // Possession of the claim code proves the email, so an unverified
        // registration is verified on the spot.
        let registration = if registration.email_verified {
            registration
        } else {
            let mut active: RegistrationActiveModel = registration.into();
            active.email_verified = Set(true);
            active.verified_at = Set(Some(Utc::now()));
            RegistrationRepository::update(active, &self.db).await?
        };

        let seminar = SeminarRepository::find_by_id(registration.seminar_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))?;

        Ok(CertificateVerifyResponse {
            status: CertificateVerifyStatus::ProceedToFeedback,
            message: "Please share your feedback to receive your certificate.".into(),
            certificate: None,
            registration: Some(RegistrationSummary::from(&registration)),
            seminar: Some(SeminarSummary::from(&seminar)),
        })
    }

    /// Accept post-seminar feedback. A matching certificate name issues the
    /// certificate immediately; a mismatch opens a name-correction request
    /// for admin review instead.
    pub async fn submit_feedback(
        &self,
        seminar_id: Uuid,
        request: &FeedbackRequest,
    ) -> CertResult<FeedbackOutcome> {
        let seminar = self.claimable_seminar(seminar_id).await?;

        let email = request.normalized_email();
        let registration =
            RegistrationRepository::find_by_seminar_and_email(seminar_id, &email, &self.db)
                .await?
                .filter(|r| r.email_verified)
                .ok_or_else(|| {
                    CertError::Validation(
                        "No verified registration was found for this email.".into(),
                    )
                })?;

        if FeedbackRepository::find_by_seminar_and_email(seminar_id, &email, &self.db)
            .await?
            .is_some()
        {
            return Err(CertError::Conflict(
                "Feedback has already been submitted for this seminar.".into(),
            ));
        }

        // If a certificate already exists the feedback is recorded but no
        // second certificate can be created.
        if let Some(existing) = CertificateRepository::find_by_seminar_and_email(
            seminar_id, &email, &self.db,
        )
        .await?
        {
            self.insert_feedback(&seminar, &registration, &email, request)
                .await?;
            return Ok(FeedbackOutcome::CertificateIssued {
                certificate: CertificateSummary::from(&existing),
                email_sent: false,
            });
        }

        let certificate_name = request.certificate_name.trim().to_string();

        if !names_match(&registration.full_name, &certificate_name) {
            let reason = request
                .name_change_reason
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            if reason.len() < 10 {
                return Err(CertError::Validation(
                    "Please provide a reason of at least 10 characters for the name change."
                        .into(),
                ));
            }
            if NameRequestRepository::find_pending_by_seminar_and_email(
                seminar_id, &email, &self.db,
            )
            .await?
            .is_some()
            {
                return Err(CertError::Conflict(
                    "A name correction request is already pending for this email.".into(),
                ));
            }

            let feedback = self
                .insert_feedback(&seminar, &registration, &email, request)
                .await?;
            let name_request = NameRequestActiveModel {
                id: Set(Uuid::new_v4()),
                feedback_id: Set(feedback.id),
                seminar_id: Set(seminar_id),
                registration_id: Set(Some(registration.id)),
                email: Set(email.clone()),
                registered_name: Set(registration.full_name.clone()),
                requested_name: Set(certificate_name),
                reason: Set(reason),
                status: Set(NameRequestStatus::Pending),
                admin_notes: Set(None),
                reviewed_at: Set(None),
                reviewed_by: Set(None),
                created_at: Set(Utc::now()),
            };
            NameRequestRepository::create(name_request, &self.db).await?;

            info!(seminar_id = %seminar_id, email, "name correction request opened");
            return Ok(FeedbackOutcome::NameChangeRequested);
        }

        let feedback = self
            .insert_feedback(&seminar, &registration, &email, request)
            .await?;
        let (certificate, email_sent) = self
            .issue_certificate(
                &seminar,
                Some(&registration),
                Some(&feedback),
                &certificate_name,
                &email,
            )
            .await?;

        Ok(FeedbackOutcome::CertificateIssued {
            certificate: CertificateSummary::from(&certificate),
            email_sent,
        })
    }

    /// Approve a pending name correction: the certificate is issued with the
    /// requested name. Already-reviewed requests conflict, which keeps a
    /// double-submitted approval from minting two certificates.
    pub async fn approve_name_request(
        &self,
        request_id: Uuid,
        reviewer: Uuid,
        notes: Option<String>,
    ) -> CertResult<CertificateSummary> {
        let request = self.pending_name_request(request_id).await?;
        let seminar = SeminarRepository::find_by_id(request.seminar_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))?;

        let reviewed = self
            .close_name_request(request, NameRequestStatus::Approved, reviewer, notes)
            .await?;

        let registration = self.request_registration(&reviewed).await?;
        let feedback = FeedbackRepository::find_by_id(reviewed.feedback_id, &self.db).await?;
        let (certificate, _) = self
            .issue_certificate(
                &seminar,
                registration.as_ref(),
                feedback.as_ref(),
                &reviewed.requested_name,
                &reviewed.email,
            )
            .await?;

        let message = templates::name_request_approved(
            &reviewed.email,
            &reviewed.requested_name,
            &seminar.title,
        );
        if let Err(e) = self.mailer.send(&message).await {
            warn!(email = %reviewed.email, error = %e, "approval notice failed");
        }

        info!(request_id = %request_id, "name correction approved");
        Ok(CertificateSummary::from(&certificate))
    }

    /// Reject a pending name correction: the certificate is issued with the
    /// name from the registration.
    pub async fn reject_name_request(
        &self,
        request_id: Uuid,
        reviewer: Uuid,
        notes: Option<String>,
    ) -> CertResult<CertificateSummary> {
        let request = self.pending_name_request(request_id).await?;
        let seminar = SeminarRepository::find_by_id(request.seminar_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))?;

        let reviewed = self
            .close_name_request(request, NameRequestStatus::Rejected, reviewer, notes.clone())
            .await?;

        let registration = self.request_registration(&reviewed).await?;
        let feedback = FeedbackRepository::find_by_id(reviewed.feedback_id, &self.db).await?;
        let (certificate, _) = self
            .issue_certificate(
                &seminar,
                registration.as_ref(),
                feedback.as_ref(),
                &reviewed.registered_name,
                &reviewed.email,
            )
            .await?;

        let message = templates::name_request_rejected(
            &reviewed.email,
            &reviewed.registered_name,
            &seminar.title,
            notes.as_deref(),
        );
        if let Err(e) = self.mailer.send(&message).await {
            warn!(email = %reviewed.email, error = %e, "rejection notice failed");
        }

        info!(request_id = %request_id, "name correction rejected");
        Ok(CertificateSummary::from(&certificate))
    }

    /// Fetch (or re-render) the PDF for a public certificate number and
    /// count the download.
    pub async fn download(&self, certificate_id: &str) -> CertResult<(CertificateModel, Vec<u8>)> {
        let certificate = self.lookup(certificate_id).await?;

        let key = ids::artifact_key(&certificate.certificate_id);
        let pdf = match self.artifacts.get(&key).await {
            Ok(Some(bytes)) => bytes,
            // Archive miss or failure: the row has everything needed to
            // render again.
            Ok(None) => self.renderer.render(&certificate)?,
            Err(e) => {
                warn!(key, error = %e, "artifact fetch failed, re-rendering");
                self.renderer.render(&certificate)?
            }
        };

        let certificate = CertificateRepository::record_download(certificate, &self.db).await?;
        Ok((certificate, pdf))
    }

    /// Public verification lookup by certificate number.
    pub async fn lookup(&self, certificate_id: &str) -> CertResult<CertificateModel> {
        CertificateRepository::find_by_certificate_id(certificate_id.trim(), &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("certificate".into()))
    }

    /// Retention cleanup: drop certificates past the retention window along
    /// with their artifacts, stale feedback, and resolved name requests.
    /// Artifact deletion failures are tolerated; the rows still go.
    pub async fn cleanup(&self) -> CertResult<CleanupSummary> {
        let cutoff = Utc::now() - Duration::days(CERTIFICATE_RETENTION_DAYS);
        let mut summary = CleanupSummary::default();

        for certificate in
            CertificateRepository::find_generated_before(cutoff, &self.db).await?
        {
            let key = ids::artifact_key(&certificate.certificate_id);
            match self.artifacts.delete(&key).await {
                Ok(()) => summary.artifacts += 1,
                Err(e) => warn!(key, error = %e, "artifact delete failed"),
            }
            summary.certificates +=
                CertificateRepository::delete(certificate.id, &self.db).await?;
        }

        summary.feedback = FeedbackRepository::delete_submitted_before(cutoff, &self.db).await?;
        summary.name_requests =
            NameRequestRepository::delete_resolved_before(cutoff, &self.db).await?;

        info!(
            certificates = summary.certificates,
            feedback = summary.feedback,
            name_requests = summary.name_requests,
            "retention cleanup finished"
        );
        Ok(summary)
    }

    /// Create the certificate row and deliver it. The unique index on
    /// (seminar_id, recipient_email) is the authoritative guard: losing a
    /// concurrent race returns the winner's row instead of erroring.
    async fn issue_certificate(
        &self,
        seminar: &SeminarModel,
        registration: Option<&RegistrationModel>,
        feedback: Option<&FeedbackModel>,
        recipient_name: &str,
        email: &str,
    ) -> CertResult<(CertificateModel, bool)> {
        let mut attempts = 0;
        let certificate = loop {
            let model = CertificateActiveModel {
                id: Set(Uuid::new_v4()),
                registration_id: Set(registration.map(|r| r.id)),
                feedback_id: Set(feedback.map(|f| f.id)),
                seminar_id: Set(seminar.id),
                certificate_id: Set(ids::generate_certificate_id()),
                recipient_name: Set(recipient_name.to_string()),
                recipient_email: Set(email.to_string()),
                seminar_title: Set(seminar.title.clone()),
                seminar_date: Set(seminar.date),
                speaker_name: Set(Some(seminar.speaker_name.clone())),
                organization: Set(Some(seminar.organization_name.clone())),
                download_count: Set(0),
                generated_at: Set(Utc::now()),
                last_downloaded_at: Set(None),
            };
            match CertificateRepository::create(model, &self.db).await {
                Ok(created) => break created,
                Err(ref storage) if is_unique_violation(storage) => {
                    if let Some(existing) = CertificateRepository::find_by_seminar_and_email(
                        seminar.id, email, &self.db,
                    )
                    .await?
                    {
                        // Another request issued it first.
                        return Ok((existing, false));
                    }
                    // Otherwise the public number collided; try a new one.
                    attempts += 1;
                    if attempts >= 3 {
                        return Err(CertError::Conflict(
                            "Could not allocate a certificate number.".into(),
                        ));
                    }
                }
                Err(e) => return Err(e.into()),
            }
        };

        let email_sent = match self.deliver(&certificate).await {
            Ok(()) => true,
            Err(e) => {
                warn!(certificate_id = %certificate.certificate_id, error = %e, "delivery failed");
                false
            }
        };

        let alert = templates::coordinator_certificate_alert(seminar, &certificate);
        if let Err(e) = self.mailer.send(&alert).await {
            warn!(seminar_id = %seminar.id, error = %e, "coordinator alert failed");
        }

        info!(
            certificate_id = %certificate.certificate_id,
            seminar_id = %seminar.id,
            email_sent,
            "certificate issued"
        );
        Ok((certificate, email_sent))
    }

    /// Render, archive, and mail the certificate PDF. Archival is
    /// best-effort; the email carries the attachment either way.
    async fn deliver(&self, certificate: &CertificateModel) -> CertResult<()> {
        let pdf = self.renderer.render(certificate)?;

        let key = ids::artifact_key(&certificate.certificate_id);
        if let Err(e) = self.artifacts.put(&key, pdf.clone()).await {
            warn!(key, error = %e, "artifact archive failed");
        }

        let download_url = format!(
            "{}/api/certificates/{}/download",
            self.base_url, certificate.certificate_id
        );
        let message = templates::certificate_email(certificate, pdf, &download_url);
        self.mailer.send(&message).await?;
        Ok(())
    }

    async fn insert_feedback(
        &self,
        seminar: &SeminarModel,
        registration: &RegistrationModel,
        email: &str,
        request: &FeedbackRequest,
    ) -> CertResult<FeedbackModel> {
        let model = FeedbackActiveModel {
            id: Set(Uuid::new_v4()),
            registration_id: Set(Some(registration.id)),
            seminar_id: Set(seminar.id),
            full_name: Set(request.full_name.trim().to_string()),
            email: Set(email.to_string()),
            college_name: Set(request.college_name.clone()),
            year: Set(request.year.clone()),
            city_state: Set(request.city_state.clone()),
            career_interest: Set(request.career_interest.clone()),
            seminar_rating: Set(request.seminar_rating),
            most_valuable_part: Set(request.most_valuable_part.clone()),
            future_suggestions: Set(request.future_suggestions.clone()),
            interested_in_courses: Set(request.interested_in_courses),
            certificate_name: Set(request.certificate_name.trim().to_string()),
            submitted_at: Set(Utc::now()),
        };
        Ok(FeedbackRepository::create(model, &self.db).await?)
    }

    async fn claimable_seminar(&self, id: Uuid) -> CertResult<SeminarModel> {
        let seminar = SeminarRepository::find_by_id(id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("seminar".into()))?;
        if !seminar.certificate_enabled {
            return Err(CertError::Validation(
                "Certificates are not yet available for this seminar.".into(),
            ));
        }
        Ok(seminar)
    }

    async fn pending_name_request(&self, request_id: Uuid) -> CertResult<NameRequestModel> {
        let request = NameRequestRepository::find_by_id(request_id, &self.db)
            .await?
            .ok_or_else(|| CertError::NotFound("name correction request".into()))?;
        if request.status.is_terminal() {
            return Err(CertError::Conflict(
                "This request has already been processed.".into(),
            ));
        }
        Ok(request)
    }

    async fn close_name_request(
        &self,
        request: NameRequestModel,
        status: NameRequestStatus,
        reviewer: Uuid,
        notes: Option<String>,
    ) -> CertResult<NameRequestModel> {
        let mut active: NameRequestActiveModel = request.into();
        active.status = Set(status);
        active.admin_notes = Set(notes);
        active.reviewed_at = Set(Some(Utc::now()));
        active.reviewed_by = Set(Some(reviewer));
        Ok(NameRequestRepository::update(active, &self.db).await?)
    }

    async fn request_registration(
        &self,
        request: &NameRequestModel,
    ) -> CertResult<Option<RegistrationModel>> {
        match request.registration_id {
            Some(id) => Ok(RegistrationRepository::find_by_id(id, &self.db).await?),
            None => Ok(None),
        }
    }

    /// Seminar-scoped lookups accept unverified rows; passing the claim code
    /// verifies them later. Without a seminar id the claim resolves against
    /// the most recent verified registration.
    async fn find_registration(
        &self,
        email: &str,
        seminar_id: Option<Uuid>,
    ) -> CertResult<Option<RegistrationModel>> {
        match seminar_id {
            Some(id) => {
                Ok(RegistrationRepository::find_by_seminar_and_email(id, email, &self.db).await?)
            }
            None => {
                Ok(RegistrationRepository::find_latest_verified_by_email(email, &self.db).await?)
            }
        }
    }

    async fn find_certificate(
        &self,
        email: &str,
        seminar_id: Option<Uuid>,
    ) -> CertResult<Option<CertificateModel>> {
        match seminar_id {
            Some(id) => {
                Ok(CertificateRepository::find_by_seminar_and_email(id, email, &self.db).await?)
            }
            None => Ok(CertificateRepository::find_latest_by_email(email, &self.db).await?),
        }
    }
}
