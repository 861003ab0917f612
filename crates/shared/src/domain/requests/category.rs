use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::status::RecordStatus;

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Thời trang nam")]
    pub name: String,

    pub description: Option<String>,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail: Option<String>,

    #[serde(default = "default_status")]
    pub status: RecordStatus,

    #[serde(default)]
    pub position: i32,
}
