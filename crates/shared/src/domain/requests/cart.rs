use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::CartLine;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CartItemRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(range(min = 0, max = 1_000_000_000_000i64))]
    #[schema(example = 199000)]
    pub price: i64,

    #[serde(default)]
    pub discount: f64,

    #[validate(range(min = 0, max = 1_000_000_000_000_000i64))]
    #[schema(example = 398000)]
    pub total: i64,
}

impl From<&CartItemRequest> for CartLine {
    fn from(item: &CartItemRequest) -> Self {
        CartLine {
            product_id: item.product_id,
            quantity: item.quantity,
            price: item.price,
            discount: item.discount,
            total: item.total,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<CartItemRequest>,
}
