use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::prelude::RegistrationModel;

/// Public seminar sign-up payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    pub phone: Option<String>,
    pub college_name: Option<String>,
    pub year: Option<String>,
    pub city_state: Option<String>,
}

impl RegisterRequest {
    /// Emails are compared and stored lowercased.
    #[inline]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// OTP submission for either the registration or certificate flow.
#[derive(Debug, Deserialize, Validate)]
pub struct OtpVerifyRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub otp: String,
}

impl OtpVerifyRequest {
    #[inline]
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

/// Admin attendance toggle for one registration.
#[derive(Debug, Deserialize, Validate)]
pub struct AttendanceRequest {
    pub attended: bool,
}

/// Slim registration view returned to the public flow.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub college_name: Option<String>,
}

impl From<&RegistrationModel> for RegistrationSummary {
    fn from(m: &RegistrationModel) -> Self {
        RegistrationSummary {
            id: m.id,
            full_name: m.full_name.clone(),
            email: m.email.clone(),
            college_name: m.college_name.clone(),
        }
    }
}
