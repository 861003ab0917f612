use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::status::{CustomerStatus, RecordStatus};

fn default_status() -> RecordStatus {
    RecordStatus::Active
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "staff@shop.vn")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub phone: Option<String>,

    pub role_id: Option<i32>,

    #[serde(default = "default_status")]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminRequest {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Leave empty to keep the current password.
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub phone: Option<String>,

    pub role_id: Option<i32>,

    #[serde(default = "default_status")]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RoleRequest {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    #[schema(example = "Content editor")]
    pub title: String,

    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePermissionsRequest {
    #[schema(example = json!(["products_view", "products_edit"]))]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerStatusRequest {
    pub status: CustomerStatus,
}
