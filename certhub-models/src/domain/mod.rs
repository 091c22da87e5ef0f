mod audit;
mod auth;
mod certificate;
mod registration;
mod seminar;

pub use audit::*;
pub use auth::*;
pub use certificate::*;
pub use registration::*;
pub use seminar::*;

use serde::{Deserialize, Serialize};

/// Plain pagination parameters for admin list endpoints without extra
/// filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 200)
    }
}

/// Paged query result shared by the admin list endpoints.
#[derive(Debug, Serialize)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    pub page_size: u64,
}
