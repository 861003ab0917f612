use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::requests::{CreateAdminRequest, FindAllRecords, UpdateAdminRequest},
    errors::RepositoryError,
    model::AdminAccount as AdminModel,
};

pub type DynAdminRepository = Arc<dyn AdminRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AdminRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<(Vec<AdminModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<AdminModel>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminModel>, RepositoryError>;
    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
        hashed_password: &str,
    ) -> Result<AdminModel, RepositoryError>;
    /// `hashed_password` of `None` keeps the stored hash.
    async fn update_admin(
        &self,
        id: i32,
        req: &UpdateAdminRequest,
        hashed_password: Option<&str>,
    ) -> Result<AdminModel, RepositoryError>;
    async fn trash_admin(&self, id: i32) -> Result<AdminModel, RepositoryError>;
}
