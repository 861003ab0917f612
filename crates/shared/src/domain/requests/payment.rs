use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, message = "Order code is required"))]
    #[schema(example = "OD240615K7QZ2M")]
    pub order_code: String,

    #[schema(example = "NCB")]
    pub bank_code: Option<String>,

    #[schema(example = "vn")]
    pub locale: Option<String>,
}
