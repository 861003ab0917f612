use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{CreateAdminRequest, FindAllRecords, LoginRequest, UpdateAdminRequest},
        responses::{
            AdminProfileResponse, AdminResponse, ApiResponse, ApiResponsePagination, TokenResponse,
        },
    },
    errors::ServiceError,
};

pub type DynAdminService = Arc<dyn AdminServiceTrait + Send + Sync>;

#[async_trait]
pub trait AdminServiceTrait {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn me(&self, admin_id: i32) -> Result<ApiResponse<AdminProfileResponse>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<AdminResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<AdminResponse>, ServiceError>;
    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError>;
    async fn update_admin(
        &self,
        id: i32,
        req: &UpdateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError>;
    async fn trash_admin(
        &self,
        acting_admin_id: i32,
        id: i32,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError>;
}
