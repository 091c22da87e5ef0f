use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Review lifecycle of a seminar request.
///
/// Transitions are validated through [`SeminarStatus::can_transition`]; the
/// only legal moves are `Pending -> Approved` and `Pending -> Rejected`.
/// Reopening a decided seminar is a deliberate manual act, not an API path.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum SeminarStatus {
    Pending,
    Approved,
    Rejected,
}

impl SeminarStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether moving from `self` to `to` is a legal transition.
    #[inline]
    pub fn can_transition(&self, to: SeminarStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl Display for SeminarStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Review lifecycle of a certificate name-correction request.
///
/// Terminal states are final: an approved or rejected request can never be
/// processed again, which is what prevents duplicate certificates from a
/// double-submitted approval.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum NameRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl NameRequestStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Display for NameRequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

/// What an OTP is allowed to unlock. Scoping codes by purpose (and seminar
/// context) means a registration code can never be replayed against the
/// certificate flow.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Registration,
    Certificate,
    AdminLogin,
}

impl OtpPurpose {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Certificate => "certificate",
            Self::AdminLogin => "admin_login",
        }
    }
}

impl Display for OtpPurpose {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(10))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Online,
    Onsite,
}

impl LocationType {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Onsite => "onsite",
        }
    }
}

impl Display for LocationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds of admin activity recorded in the audit trail.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Logout,
    Create,
    Update,
    Delete,
    PasswordReset,
}

impl AuditAction {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}
