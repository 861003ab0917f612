use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::{FindAllRecords, PromotionRequest},
    errors::RepositoryError,
    model::Promotion as PromotionModel,
};

pub type DynPromotionRepository = Arc<dyn PromotionRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait PromotionRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<(Vec<PromotionModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<PromotionModel>, RepositoryError>;
    /// Looks up a live code; `code` is already normalised.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromotionModel>, RepositoryError>;
    async fn create_promotion(
        &self,
        req: &PromotionRequest,
    ) -> Result<PromotionModel, RepositoryError>;
    async fn update_promotion(
        &self,
        id: i32,
        req: &PromotionRequest,
    ) -> Result<PromotionModel, RepositoryError>;
    async fn trash_promotion(&self, id: i32) -> Result<PromotionModel, RepositoryError>;
    async fn restore_promotion(&self, id: i32) -> Result<PromotionModel, RepositoryError>;
}
