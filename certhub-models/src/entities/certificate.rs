//! `SeaORM` entity for issued participation certificates.
//!
//! The (seminar_id, recipient_email) unique index is the authoritative
//! one-certificate-per-recipient guard. Rows are immutable after creation
//! except for the download counters; re-requests resend the existing
//! artifact instead of regenerating identity data.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "certificates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub registration_id: Option<Uuid>,
    pub feedback_id: Option<Uuid>,
    pub seminar_id: Uuid,
    /// Public certificate number printed on the PDF, e.g. `ZX-7KQ4M`.
    #[sea_orm(unique)]
    pub certificate_id: String,
    pub recipient_name: String,
    pub recipient_email: String,
    /// Seminar identity is denormalized at issuance time so the printed
    /// certificate stays stable even if the seminar row is edited later.
    pub seminar_title: String,
    pub seminar_date: Date,
    pub speaker_name: Option<String>,
    pub organization: Option<String>,
    pub download_count: i32,
    pub generated_at: DateTimeUtc,
    pub last_downloaded_at: Option<DateTimeUtc>,
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
