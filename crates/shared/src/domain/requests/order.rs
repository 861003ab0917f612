use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::status::{OrderStatus, PaymentMethod, PaymentStatus};

/// One line as the client priced it; re-checked against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, max = 1000, message = "Quantity must be between 1 and 1000"))]
    #[schema(example = 2)]
    pub quantity: i32,

    #[validate(range(min = 0, max = 1_000_000_000_000i64, message = "Price is out of range"))]
    #[schema(example = 199000)]
    pub price: i64,

    #[serde(default)]
    #[schema(example = 20.32)]
    pub discount: f64,

    #[schema(example = 398000)]
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    #[schema(example = "Nguyễn Văn A")]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "khach@example.com")]
    pub email: String,

    #[validate(length(min = 8, max = 20, message = "Invalid phone number"))]
    #[schema(example = "0901234567")]
    pub phone: String,

    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 Lê Lợi, Quận 1, TP.HCM")]
    pub address: String,

    pub note: Option<String>,

    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,

    pub promotion_id: Option<i32>,

    #[serde(default)]
    #[schema(example = 0)]
    pub discount: i64,

    #[schema(example = 398000)]
    pub total: i64,

    pub payment_method: PaymentMethod,

    /// VNPay bank preselection, ignored for COD.
    pub bank_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: i64) -> OrderItemRequest {
        OrderItemRequest {
            product_id: 1,
            quantity,
            price,
            discount: 0.0,
            total: 0,
        }
    }

    #[test]
    fn line_quantity_and_price_are_bounded() {
        assert!(line(1000, 199_000).validate().is_ok());
        assert!(line(1001, 199_000).validate().is_err());
        assert!(line(0, 199_000).validate().is_err());
        assert!(line(1, 5_000_000_000_000).validate().is_err());
    }
}
