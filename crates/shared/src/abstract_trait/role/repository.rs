use async_trait::async_trait;
use std::sync::Arc;

use crate::{domain::requests::RoleRequest, errors::RepositoryError, model::Role as RoleModel};

pub type DynRoleRepository = Arc<dyn RoleRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait RoleRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<RoleModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<RoleModel>, RepositoryError>;
    async fn create_role(&self, req: &RoleRequest) -> Result<RoleModel, RepositoryError>;
    async fn update_role(&self, id: i32, req: &RoleRequest) -> Result<RoleModel, RepositoryError>;
    async fn update_permissions(
        &self,
        id: i32,
        permissions: &[String],
    ) -> Result<RoleModel, RepositoryError>;
    async fn trash_role(&self, id: i32) -> Result<RoleModel, RepositoryError>;
    /// Permission codes of an active, live admin through a live role.
    async fn find_permissions_for_admin(
        &self,
        admin_id: i32,
    ) -> Result<Option<Vec<String>>, RepositoryError>;
}
