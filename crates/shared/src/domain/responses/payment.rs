use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct PaymentUrlResponse {
    pub order_code: String,
    pub payment_url: String,
}

/// What the browser return page shows after VNPay redirects back.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct PaymentResultResponse {
    pub order_code: String,
    pub success: bool,
    pub payment_status: String,
    pub response_code: String,
}
