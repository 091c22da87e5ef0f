use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};

/// Admin roles, ordered by privilege. Stored on the admin row and carried in
/// the session token; authorization is evaluated per request from the token
/// role, never from per-row ACLs.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(20))",
    rename_all = "snake_case"
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Sales,
    Marketing,
    Media,
}

impl Role {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Sales => "sales",
            Self::Marketing => "marketing",
            Self::Media => "media",
        }
    }

    /// Human-readable label for admin UIs and audit views.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Admin => "Admin",
            Self::Sales => "Sales",
            Self::Marketing => "Marketing",
            Self::Media => "Media",
        }
    }

    /// Higher number means more privileges. Used only for ordering in user
    /// management views; authorization goes through the permission matrix.
    #[inline]
    pub fn hierarchy(&self) -> u8 {
        match self {
            Self::SuperAdmin => 100,
            Self::Admin => 50,
            Self::Sales => 30,
            Self::Marketing => 20,
            Self::Media => 15,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Closed set of protected resources. Adding a resource forces every match
/// in the permission matrix to be revisited; nothing defaults to allow.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Users,
    Customers,
    Sales,
    Plans,
    Products,
    Audit,
    Blog,
    Leads,
    ReferralCodes,
    Whitepapers,
    Seminars,
    Settings,
}

impl Resource {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Customers => "customers",
            Self::Sales => "sales",
            Self::Plans => "plans",
            Self::Products => "products",
            Self::Audit => "audit",
            Self::Blog => "blog",
            Self::Leads => "leads",
            Self::ReferralCodes => "referral_codes",
            Self::Whitepapers => "whitepapers",
            Self::Seminars => "seminars",
            Self::Settings => "settings",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Closed set of actions evaluated against a resource.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Read,
    Create,
    Update,
    Delete,
    Publish,
}

impl ActionKind {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Publish => "publish",
        }
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.as_str())
    }
}
