use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{DynRoleRepository, PermissionServiceTrait},
    domain::{
        requests::UpdatePermissionsRequest,
        responses::{ApiResponse, RoleResponse},
    },
    errors::ServiceError,
    utils::{Method, ServiceObserver},
};

pub const PRODUCTS_VIEW: &str = "products_view";
pub const PRODUCTS_EDIT: &str = "products_edit";
pub const CATEGORIES_VIEW: &str = "categories_view";
pub const CATEGORIES_EDIT: &str = "categories_edit";
pub const ORDERS_VIEW: &str = "orders_view";
pub const ORDERS_EDIT: &str = "orders_edit";
pub const PROMOTIONS_VIEW: &str = "promotions_view";
pub const PROMOTIONS_EDIT: &str = "promotions_edit";
pub const CUSTOMERS_VIEW: &str = "customers_view";
pub const CUSTOMERS_EDIT: &str = "customers_edit";
pub const ACCOUNTS_VIEW: &str = "accounts_view";
pub const ACCOUNTS_EDIT: &str = "accounts_edit";
pub const ROLES_VIEW: &str = "roles_view";
pub const ROLES_EDIT: &str = "roles_edit";
pub const ROLES_PERMISSIONS: &str = "roles_permissions";

/// Every permission code a role can grant.
pub const PERMISSIONS: [&str; 15] = [
    PRODUCTS_VIEW,
    PRODUCTS_EDIT,
    CATEGORIES_VIEW,
    CATEGORIES_EDIT,
    ORDERS_VIEW,
    ORDERS_EDIT,
    PROMOTIONS_VIEW,
    PROMOTIONS_EDIT,
    CUSTOMERS_VIEW,
    CUSTOMERS_EDIT,
    ACCOUNTS_VIEW,
    ACCOUNTS_EDIT,
    ROLES_VIEW,
    ROLES_EDIT,
    ROLES_PERMISSIONS,
];

/// Trimmed, de-duplicated codes in request order; unknown codes are an error.
fn normalize_permissions(requested: &[String]) -> Result<Vec<String>, ServiceError> {
    let mut accepted: Vec<String> = Vec::with_capacity(requested.len());
    let mut unknown = Vec::new();

    for code in requested.iter().map(|code| code.trim()) {
        if !PERMISSIONS.contains(&code) {
            unknown.push(format!("Unknown permission '{code}'"));
        } else if !accepted.iter().any(|existing| existing == code) {
            accepted.push(code.to_string());
        }
    }

    if unknown.is_empty() {
        Ok(accepted)
    } else {
        Err(ServiceError::Validation(unknown))
    }
}

pub struct PermissionService {
    roles: DynRoleRepository,
    observer: ServiceObserver,
}

impl PermissionService {
    pub async fn new(roles: DynRoleRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("permission_service", &registry).await;

        Self { roles, observer }
    }
}

#[async_trait]
impl PermissionServiceTrait for PermissionService {
    fn catalog(&self) -> ApiResponse<Vec<String>> {
        ApiResponse::success(
            "Permissions retrieved successfully",
            PERMISSIONS.iter().map(|code| code.to_string()).collect(),
        )
    }

    async fn update_permissions(
        &self,
        role_id: i32,
        req: &UpdatePermissionsRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_role_permissions",
            vec![
                KeyValue::new("component", "permission"),
                KeyValue::new("role.id", role_id.to_string()),
            ],
        );

        let permissions = match normalize_permissions(&req.permissions) {
            Ok(permissions) => permissions,
            Err(err) => {
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Unknown permission codes");
                return Err(err);
            }
        };

        match self.roles.update_permissions(role_id, &permissions).await {
            Ok(role) => {
                self.observer
                    .success(&tracing_ctx, Method::Put, "Role permissions replaced");
                Ok(ApiResponse::success(
                    "Permissions updated successfully",
                    RoleResponse::from(role),
                ))
            }
            Err(err) => {
                error!("❌ Failed to update permissions of role {role_id}: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Put, "Failed to update permissions");
                Err(ServiceError::Repo(err))
            }
        }
    }

    async fn permissions_of(&self, admin_id: i32) -> Result<Vec<String>, ServiceError> {
        self.roles
            .find_permissions_for_admin(admin_id)
            .await?
            .ok_or_else(|| {
                warn!("⚠️ Admin {admin_id} has no active role");
                ServiceError::Forbidden("Account is inactive or has no role".to_string())
            })
    }

    async fn authorize(&self, admin_id: i32, permission: &str) -> Result<(), ServiceError> {
        let permissions = self.permissions_of(admin_id).await?;

        if permissions.iter().any(|granted| granted == permission) {
            Ok(())
        } else {
            info!("🚫 Admin {admin_id} lacks permission {permission}");
            Err(ServiceError::Forbidden(format!(
                "Missing permission: {permission}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_dropped_in_order() {
        let requested = vec![
            "orders_view".to_string(),
            " products_edit ".to_string(),
            "orders_view".to_string(),
        ];

        assert_eq!(
            normalize_permissions(&requested).unwrap(),
            vec!["orders_view".to_string(), "products_edit".to_string()]
        );
    }

    #[test]
    fn unknown_codes_are_reported() {
        let requested = vec!["orders_view".to_string(), "root".to_string()];

        match normalize_permissions(&requested) {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors, vec!["Unknown permission 'root'".to_string()])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
