//! `SeaORM` entity for post-seminar feedback.
//!
//! Feedback acceptance is the trigger that creates a certificate for the
//! normal path, so the (seminar_id, email) pair is unique here too.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub registration_id: Option<Uuid>,
    pub seminar_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub college_name: Option<String>,
    pub year: Option<String>,
    pub city_state: Option<String>,
    pub career_interest: Option<String>,
    /// 1..=5 when present.
    pub seminar_rating: Option<i16>,
    #[sea_orm(column_type = "Text", nullable)]
    pub most_valuable_part: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub future_suggestions: Option<String>,
    pub interested_in_courses: bool,
    /// The exact name the attendee wants printed on the certificate.
    pub certificate_name: String,
    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id"
    )]
    Seminar,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
