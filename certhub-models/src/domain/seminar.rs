use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::prelude::SeminarModel;
use crate::enums::{LocationType, SeminarStatus};

/// Admin request to create a seminar. New seminars always start pending.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSeminarRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 50))]
    pub time: String,
    #[validate(length(min = 1, max = 50))]
    pub duration: String,
    #[validate(length(min = 1, max = 200))]
    pub speaker_name: String,
    pub speaker_title: Option<String>,
    pub location_type: LocationType,
    pub venue_address: Option<String>,
    pub max_attendees: Option<i32>,
    #[validate(length(min = 1, max = 300))]
    pub organization_name: String,
    #[validate(length(min = 1, max = 200))]
    pub contact_person: String,
    #[validate(email)]
    pub contact_email: String,
    pub contact_phone: Option<String>,
}

/// Partial update; only provided fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeminarRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration: Option<String>,
    pub speaker_name: Option<String>,
    pub speaker_title: Option<String>,
    pub venue_address: Option<String>,
    pub max_attendees: Option<i32>,
    pub registration_enabled: Option<bool>,
    pub certificate_enabled: Option<bool>,
}

/// Admin seminar listing filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeminarListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub status: Option<SeminarStatus>,
}

impl SeminarListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 200)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectSeminarRequest {
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

/// Custom announcement broadcast to verified registrants.
#[derive(Debug, Deserialize, Validate)]
pub struct BroadcastRequest {
    #[validate(length(min = 1, max = 300))]
    pub subject: String,
    #[validate(length(min = 1, max = 10_000))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NameRequestDecision {
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

/// Public seminar view: what an attendee needs to register, nothing about
/// the coordinator or review trail.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSeminar {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub duration: String,
    pub speaker_name: String,
    pub speaker_title: Option<String>,
    pub location_type: LocationType,
    pub venue_address: Option<String>,
    pub status: SeminarStatus,
    pub registration_enabled: bool,
    pub certificate_enabled: bool,
}

impl From<SeminarModel> for PublicSeminar {
    fn from(m: SeminarModel) -> Self {
        PublicSeminar {
            id: m.id,
            title: m.title,
            description: m.description,
            date: m.date,
            time: m.time,
            duration: m.duration,
            speaker_name: m.speaker_name,
            speaker_title: m.speaker_title,
            location_type: m.location_type,
            venue_address: m.venue_address,
            status: m.status,
            registration_enabled: m.registration_enabled,
            certificate_enabled: m.certificate_enabled,
        }
    }
}
