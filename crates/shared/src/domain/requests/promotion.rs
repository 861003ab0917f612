use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::status::{DiscountType, RecordStatus};

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PromotionRequest {
    #[validate(length(min = 3, max = 50, message = "Code must be 3 to 50 characters"))]
    #[schema(example = "SUMMER10")]
    pub code: String,

    pub description: Option<String>,

    pub discount_type: DiscountType,

    #[validate(range(min = 1, message = "Discount value must be positive"))]
    #[schema(example = 10)]
    pub discount_value: i64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Minimum order value cannot be negative"))]
    pub min_order_value: i64,

    #[schema(value_type = String, example = "2024-06-01T00:00:00")]
    pub start_date: NaiveDateTime,

    #[schema(value_type = String, example = "2024-06-30T23:59:59")]
    pub end_date: NaiveDateTime,

    #[serde(default = "default_status")]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CheckPromotionRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "SUMMER10")]
    pub code: String,

    #[validate(range(min = 0, message = "Sub total cannot be negative"))]
    #[schema(example = 500000)]
    pub sub_total: i64,
}
