use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::Promotion;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PromotionResponse {
    pub id: i32,
    pub code: String,
    pub description: Option<String>,
    pub discount_type: String,
    pub discount_value: i64,
    pub min_order_value: i64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Promotion> for PromotionResponse {
    fn from(value: Promotion) -> Self {
        PromotionResponse {
            id: value.promotion_id,
            code: value.code,
            description: value.description,
            discount_type: value.discount_type,
            discount_value: value.discount_value,
            min_order_value: value.min_order_value,
            start_date: value.start_date.to_string(),
            end_date: value.end_date.to_string(),
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}
