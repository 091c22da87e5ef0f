//! `SeaORM` entity for seminar registrations.
//!
//! One row per (seminar, email); the pair is backed by a unique index so a
//! concurrent double sign-up cannot create duplicates regardless of what the
//! application-level check observed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub seminar_id: Uuid,
    pub full_name: String,
    /// Stored lowercased; all lookups normalize first.
    pub email: String,
    pub phone: Option<String>,
    pub college_name: Option<String>,
    pub year: Option<String>,
    pub city_state: Option<String>,
    pub email_verified: bool,
    pub attended: bool,
    pub registered_at: DateTimeUtc,
    pub verified_at: Option<DateTimeUtc>,
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
