use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

use crate::{
    abstract_trait::{DynRoleRepository, RoleServiceTrait},
    domain::{
        requests::RoleRequest,
        responses::{ApiResponse, RoleResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Role as RoleModel,
    utils::{Method, ServiceObserver, TracingContext},
};

pub struct RoleService {
    roles: DynRoleRepository,
    observer: ServiceObserver,
}

impl RoleService {
    pub async fn new(roles: DynRoleRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("role_service", &registry).await;

        Self { roles, observer }
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<RoleModel, RepositoryError>,
        message: &str,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        match result {
            Ok(role) => {
                self.observer.success(tracing_ctx, method, message);
                Ok(ApiResponse::success(message, RoleResponse::from(role)))
            }
            Err(err) => {
                error!("❌ Role command failed: {err:?}");
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(ServiceError::Repo(err))
            }
        }
    }
}

#[async_trait]
impl RoleServiceTrait for RoleService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<RoleResponse>>, ServiceError> {
        let roles = self.roles.find_all().await?;

        Ok(ApiResponse::success(
            "Roles retrieved successfully",
            roles.into_iter().map(RoleResponse::from).collect(),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        match self.roles.find_by_id(id).await? {
            Some(role) => Ok(ApiResponse::success(
                "Role retrieved successfully",
                RoleResponse::from(role),
            )),
            None => Err(ServiceError::NotFound(format!("Role {id} not found"))),
        }
    }

    async fn create_role(
        &self,
        req: &RoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "create_role",
            vec![
                KeyValue::new("component", "role"),
                KeyValue::new("role.title", req.title.clone()),
            ],
        );

        let result = self.roles.create_role(req).await;
        self.finish(&tracing_ctx, Method::Post, result, "Role created successfully")
    }

    async fn update_role(
        &self,
        id: i32,
        req: &RoleRequest,
    ) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_role",
            vec![
                KeyValue::new("component", "role"),
                KeyValue::new("role.id", id.to_string()),
            ],
        );

        let result = self.roles.update_role(id, req).await;
        self.finish(&tracing_ctx, Method::Put, result, "Role updated successfully")
    }

    async fn trash_role(&self, id: i32) -> Result<ApiResponse<RoleResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_role",
            vec![
                KeyValue::new("component", "role"),
                KeyValue::new("role.id", id.to_string()),
            ],
        );

        let result = self.roles.trash_role(id).await;
        self.finish(&tracing_ctx, Method::Delete, result, "Role moved to trash")
    }
}
