//! `SeaORM` entity for one-time verification codes.
//!
//! At most one active row exists per (email, purpose, seminar_id): issuing a
//! new code deletes any prior row for the key first. Rows are single-use —
//! `verified` flips on success and the row is then dead to further checks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::OtpPurpose;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "otp_verifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub otp_code: String,
    pub purpose: OtpPurpose,
    /// Context scoping the code. Null for purposes without a seminar
    /// (admin login).
    pub seminar_id: Option<Uuid>,
    /// Failed match counter; the code burns out at the attempt cap.
    pub attempts: i32,
    pub verified: bool,
    pub expires_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
