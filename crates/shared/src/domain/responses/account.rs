use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{AdminAccount, Customer, Role};

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CustomerResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Customer> for CustomerResponse {
    fn from(value: Customer) -> Self {
        CustomerResponse {
            id: value.customer_id,
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            address: value.address,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role_id: Option<i32>,
    pub status: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<AdminAccount> for AdminResponse {
    fn from(value: AdminAccount) -> Self {
        AdminResponse {
            id: value.admin_id,
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            role_id: value.role_id,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}

/// Signed-in admin together with what their role allows.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AdminProfileResponse {
    pub account: AdminResponse,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RoleResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub deleted_at: Option<String>,
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        RoleResponse {
            id: value.role_id,
            title: value.title,
            description: value.description,
            permissions: value.permissions,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
            deleted_at: value.deleted_at.map(|dt| dt.to_string()),
        }
    }
}
