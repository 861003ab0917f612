use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{Cart, CartLine};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartResponse {
    pub id: i32,
    pub customer_id: i32,
    pub items: Vec<CartLine>,
    pub total_quantity: i64,
    pub sub_total: i64,
    pub updated_at: Option<String>,
}

impl From<Cart> for CartResponse {
    fn from(value: Cart) -> Self {
        let items = value.info_product.0;

        CartResponse {
            id: value.cart_id,
            customer_id: value.customer_id,
            total_quantity: items.iter().map(|line| line.quantity as i64).sum(),
            sub_total: items.iter().map(|line| line.total).sum(),
            items,
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}
