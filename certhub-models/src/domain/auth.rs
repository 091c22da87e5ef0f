use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::prelude::AdminUserModel;
use crate::enums::Role;

/// Signed session token payload. Identity lives entirely in the token;
/// there is no server-side session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin id.
    pub sub: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(admin: &AdminUserModel, ttl_hours: i64) -> Self {
        let now = Utc::now().timestamp();
        Claims {
            sub: admin.id,
            email: admin.email.clone(),
            name: admin
                .name
                .clone()
                .unwrap_or_else(|| admin.email.split('@').next().unwrap_or_default().to_string()),
            role: admin.role,
            iat: now,
            exp: now + ttl_hours * 3600,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminPublic,
}

/// Admin account view without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct AdminPublic {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

impl From<AdminUserModel> for AdminPublic {
    fn from(m: AdminUserModel) -> Self {
        AdminPublic {
            id: m.id,
            email: m.email,
            name: m.name,
            role: m.role,
            is_active: m.is_active,
        }
    }
}
