use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{CheckPromotionRequest, FindAllRecords, PromotionRequest},
        responses::{ApiResponse, ApiResponsePagination, PromotionResponse},
    },
    errors::ServiceError,
    pricing::PromotionQuote,
};

pub type DynPromotionService = Arc<dyn PromotionServiceTrait + Send + Sync>;

#[async_trait]
pub trait PromotionServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<ApiResponsePagination<Vec<PromotionResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<PromotionResponse>, ServiceError>;
    async fn create_promotion(
        &self,
        req: &PromotionRequest,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError>;
    async fn update_promotion(
        &self,
        id: i32,
        req: &PromotionRequest,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError>;
    async fn trash_promotion(
        &self,
        id: i32,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError>;
    async fn restore_promotion(
        &self,
        id: i32,
    ) -> Result<ApiResponse<PromotionResponse>, ServiceError>;
    /// What a code would take off `sub_total` right now.
    async fn check_code(
        &self,
        req: &CheckPromotionRequest,
    ) -> Result<ApiResponse<PromotionQuote>, ServiceError>;
}
