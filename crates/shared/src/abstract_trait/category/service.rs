use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{CategoryRequest, FindAllRecords, UpdateStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, CategoryResponse},
    },
    errors::ServiceError,
};

pub type DynCategoryService = Arc<dyn CategoryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryServiceTrait {
    async fn find_visible(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<ApiResponsePagination<Vec<CategoryResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn create_category(
        &self,
        req: &CategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn update_category(
        &self,
        id: i32,
        req: &CategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateStatusRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn trash_category(&self, id: i32)
    -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn restore_category(
        &self,
        id: i32,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
}
