//! `SeaORM` entity for seminars requested by partner institutions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::{LocationType, SeminarStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "seminars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub date: Date,
    pub time: String,
    pub duration: String,
    pub speaker_name: String,
    pub speaker_title: Option<String>,
    pub location_type: LocationType,
    pub venue_address: Option<String>,
    pub max_attendees: Option<i32>,

    /// Requesting institution and its coordinator contact.
    pub organization_name: String,
    pub contact_person: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,

    /// Admin controls. Registration and certificate issuance are gated
    /// independently so coordinators can open sign-ups before the event and
    /// certificates only after it.
    pub status: SeminarStatus,
    pub registration_enabled: bool,
    pub certificate_enabled: bool,
    pub rejection_reason: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub approved_at: Option<DateTimeUtc>,
    pub approved_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registration::Entity")]
    Registration,
    #[sea_orm(has_many = "super::certificate::Entity")]
    Certificate,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
    #[sea_orm(has_many = "super::name_request::Entity")]
    NameRequest,
}

impl Related<super::registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registration.def()
    }
}

impl Related<super::certificate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Certificate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A seminar accepts public registrations only once approved and while
    /// the registration flag is on.
    #[inline]
    pub fn is_bookable(&self) -> bool {
        self.status == SeminarStatus::Approved && self.registration_enabled
    }
}
