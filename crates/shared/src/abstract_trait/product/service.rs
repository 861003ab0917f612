use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{FindAllProducts, FindAllRecords, ProductRequest, UpdateStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::ServiceError,
};

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_visible(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_featured(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_slug(&self, slug: &str) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_trashed(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        id: i32,
        req: &ProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_status(
        &self,
        id: i32,
        req: &UpdateStatusRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn trash_product(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn restore_product(&self, id: i32)
    -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
