use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    domain::{
        requests::{RoleRequest, UpdatePermissionsRequest},
        responses::{ApiResponse, RoleResponse},
    },
    errors::ServiceError,
};

pub type DynRoleService = Arc<dyn RoleServiceTrait + Send + Sync>;
pub type DynPermissionService = Arc<dyn PermissionServiceTrait + Send + Sync>;

#[async_trait]
pub trait RoleServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<RoleResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn create_role(&self, req: &RoleRequest)
    -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn update_role(
        &self,
        id: i32,
        req: &RoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn trash_role(&self, id: i32) -> Result<ApiResponse<RoleResponse>, ServiceError>;
}

#[async_trait]
pub trait PermissionServiceTrait {
    /// Every permission code the back office knows about.
    fn catalog(&self) -> ApiResponse<Vec<String>>;
    async fn update_permissions(
        &self,
        role_id: i32,
        req: &UpdatePermissionsRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError>;
    async fn permissions_of(&self, admin_id: i32) -> Result<Vec<String>, ServiceError>;
    /// `Forbidden` unless the admin's role grants `permission`.
    async fn authorize(&self, admin_id: i32, permission: &str) -> Result<(), ServiceError>;
}
