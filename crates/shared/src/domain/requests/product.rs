use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::status::RecordStatus;

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

/// Body for both creating and updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[schema(example = 1)]
    pub category_id: Option<i32>,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    #[schema(example = "Áo thun cotton")]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0, max = 1_000_000_000_000i64, message = "Price is out of range"))]
    #[schema(example = 199000)]
    pub price: i64,

    #[serde(default)]
    #[validate(range(min = 0, max = 1_000_000_000_000i64, message = "Compare price is out of range"))]
    #[schema(example = 249000)]
    pub compare_price: i64,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default = "default_status")]
    pub status: RecordStatus,

    #[serde(default)]
    pub position: i32,

    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: RecordStatus,
}
