use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub status: String,
    pub position: i32,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub deleted_at: Option<NaiveDateTime>,
}

impl Category {
    /// Shown in the storefront: active and not in the trash.
    pub fn is_visible(&self) -> bool {
        self.status == "active" && self.deleted_at.is_none()
    }
}
