//! `SeaORM` entity for certificate name-correction requests.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::NameRequestStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "certificate_name_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub feedback_id: Uuid,
    pub seminar_id: Uuid,
    pub registration_id: Option<Uuid>,
    pub email: String,
    /// Name on file from the registration.
    pub registered_name: String,
    /// Name the attendee wants printed instead.
    pub requested_name: String,
    pub reason: String,
    pub status: NameRequestStatus,
    pub admin_notes: Option<String>,
    pub reviewed_at: Option<DateTimeUtc>,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id"
    )]
    Seminar,
    #[sea_orm(
        belongs_to = "super::feedback::Entity",
        from = "Column::FeedbackId",
        to = "super::feedback::Column::Id"
    )]
    Feedback,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
