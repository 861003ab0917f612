use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{
            FindAllRecords, ForgotPasswordRequest, LoginRequest, RegisterRequest,
            ResetPasswordRequest, UpdateCustomerStatusRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse, TokenResponse},
    },
    errors::ServiceError,
};

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;
pub type DynCustomerService = Arc<dyn CustomerServiceTrait + Send + Sync>;

/// Storefront account flows.
#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn me(&self, customer_id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn forgot_password(
        &self,
        req: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
    async fn reset_password(
        &self,
        req: &ResetPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
}

/// Back-office customer management.
#[async_trait]
pub trait CustomerServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateCustomerStatusRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn trash_customer(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
}
