use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::{FindAllProducts, FindAllRecords, ProductRequest},
    errors::RepositoryError,
    model::Product as ProductModel,
};

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Products a shopper may see: live, active, in a live active category.
    async fn find_visible(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_featured(&self, limit: i64) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_visible_by_slug(&self, slug: &str)
    -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_trashed(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(
        &self,
        req: &ProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_product(
        &self,
        id: i32,
        req: &ProductRequest,
        slug: &str,
    ) -> Result<ProductModel, RepositoryError>;
    async fn update_status(&self, id: i32, status: &str) -> Result<ProductModel, RepositoryError>;
    async fn trash_product(&self, id: i32) -> Result<ProductModel, RepositoryError>;
    async fn restore_product(&self, id: i32) -> Result<ProductModel, RepositoryError>;
}
