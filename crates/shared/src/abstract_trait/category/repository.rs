use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::{CategoryRequest, FindAllRecords},
    errors::RepositoryError,
    model::Category as CategoryModel,
};

pub type DynCategoryRepository = Arc<dyn CategoryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryRepositoryTrait {
    async fn find_visible(&self) -> Result<Vec<CategoryModel>, RepositoryError>;
    async fn find_all(
        &self,
        req: &FindAllRecords,
        trashed: bool,
    ) -> Result<(Vec<CategoryModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError>;
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;
    async fn create_category(
        &self,
        req: &CategoryRequest,
        slug: &str,
    ) -> Result<CategoryModel, RepositoryError>;
    async fn update_category(
        &self,
        id: i32,
        req: &CategoryRequest,
        slug: &str,
    ) -> Result<CategoryModel, RepositoryError>;
    async fn update_status(&self, id: i32, status: &str)
    -> Result<CategoryModel, RepositoryError>;
    async fn trash_category(&self, id: i32) -> Result<CategoryModel, RepositoryError>;
    async fn restore_category(&self, id: i32) -> Result<CategoryModel, RepositoryError>;
}
