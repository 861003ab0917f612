use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{
        AdminServiceTrait, DynAdminRepository, DynHashing, DynJwtService, DynRoleRepository,
    },
    config::SCOPE_ADMIN,
    domain::{
        requests::{CreateAdminRequest, FindAllRecords, LoginRequest, UpdateAdminRequest},
        responses::{
            AdminProfileResponse, AdminResponse, ApiResponse, ApiResponsePagination, Pagination,
            TokenResponse,
        },
        status::RecordStatus,
    },
    errors::{RepositoryError, ServiceError},
    model::AdminAccount as AdminModel,
    utils::{Method, ServiceObserver, TracingContext},
};

#[derive(Clone)]
pub struct AdminServiceDeps {
    pub admins: DynAdminRepository,
    pub roles: DynRoleRepository,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
}

pub struct AdminService {
    deps: AdminServiceDeps,
    observer: ServiceObserver,
}

impl AdminService {
    pub async fn new(deps: AdminServiceDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("admin_service", &registry).await;

        Self { deps, observer }
    }

    fn finish(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: Result<AdminModel, ServiceError>,
        message: &str,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        match result {
            Ok(admin) => {
                self.observer.success(tracing_ctx, method, message);
                Ok(ApiResponse::success(message, AdminResponse::from(admin)))
            }
            Err(err) => {
                error!("❌ Admin command failed: {err}");
                self.observer.failure(tracing_ctx, method, &err.to_string());
                Err(err)
            }
        }
    }

    async fn ensure_role_exists(&self, role_id: Option<i32>) -> Result<(), ServiceError> {
        if let Some(role_id) = role_id {
            if self.deps.roles.find_by_id(role_id).await?.is_none() {
                return Err(ServiceError::validation(format!(
                    "Role {role_id} does not exist"
                )));
            }
        }
        Ok(())
    }

    async fn ensure_email_free(&self, email: &str, own_id: Option<i32>) -> Result<(), ServiceError> {
        match self.deps.admins.find_by_email(email).await? {
            Some(other) if Some(other.admin_id) != own_id => Err(ServiceError::Repo(
                RepositoryError::AlreadyExists(format!("Email {email} is already in use")),
            )),
            _ => Ok(()),
        }
    }

    async fn check_login(&self, req: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let admin = self
            .deps
            .admins
            .find_by_email(&req.email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if admin.status != RecordStatus::Active.as_str() {
            return Err(ServiceError::Forbidden("Account is inactive".to_string()));
        }

        self.deps
            .hashing
            .compare_password(&admin.password, &req.password)
            .await?;

        let access_token = self
            .deps
            .jwt
            .generate_token(admin.admin_id as i64, SCOPE_ADMIN)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.deps.jwt.expires_in(SCOPE_ADMIN),
        })
    }
}

#[async_trait]
impl AdminServiceTrait for AdminService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "login_admin",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("admin.email", req.email.clone()),
            ],
        );

        match self.check_login(req).await {
            Ok(token) => {
                info!("🔓 Admin {} logged in", req.email);
                self.observer
                    .success(&tracing_ctx, Method::Post, "Admin logged in");
                Ok(ApiResponse::success("Login successful", token))
            }
            Err(err) => {
                warn!("⚠️ Admin login refused for {}: {err}", req.email);
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }

    async fn me(&self, admin_id: i32) -> Result<ApiResponse<AdminProfileResponse>, ServiceError> {
        let admin = self
            .deps
            .admins
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Admin {admin_id} not found")))?;

        let permissions = self
            .deps
            .roles
            .find_permissions_for_admin(admin_id)
            .await?
            .unwrap_or_default();

        Ok(ApiResponse::success(
            "Profile retrieved successfully",
            AdminProfileResponse {
                account: AdminResponse::from(admin),
                permissions,
            },
        ))
    }

    async fn find_all(
        &self,
        req: &FindAllRecords,
    ) -> Result<ApiResponsePagination<Vec<AdminResponse>>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "find_all_admins",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("page", req.page.to_string()),
            ],
        );

        let (admins, total) = match self.deps.admins.find_all(req).await {
            Ok(page) => page,
            Err(err) => {
                error!("❌ Failed to fetch admin accounts: {err:?}");
                self.observer
                    .failure(&tracing_ctx, Method::Get, "Failed to fetch admin accounts");
                return Err(ServiceError::Repo(err));
            }
        };

        self.observer
            .success(&tracing_ctx, Method::Get, "Admin accounts retrieved");

        Ok(ApiResponsePagination::success(
            "Accounts retrieved successfully",
            admins.into_iter().map(AdminResponse::from).collect(),
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        match self.deps.admins.find_by_id(id).await? {
            Some(admin) => Ok(ApiResponse::success(
                "Account retrieved successfully",
                AdminResponse::from(admin),
            )),
            None => Err(ServiceError::NotFound(format!("Admin {id} not found"))),
        }
    }

    async fn create_admin(
        &self,
        req: &CreateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "create_admin",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("admin.email", req.email.clone()),
            ],
        );

        let result: Result<AdminModel, ServiceError> = async {
            self.ensure_email_free(&req.email, None).await?;
            self.ensure_role_exists(req.role_id).await?;

            let hashed = self.deps.hashing.hash_password(&req.password).await?;
            Ok(self.deps.admins.create_admin(req, &hashed).await?)
        }
        .await;

        self.finish(&tracing_ctx, Method::Post, result, "Account created successfully")
    }

    async fn update_admin(
        &self,
        id: i32,
        req: &UpdateAdminRequest,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "update_admin",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("admin.id", id.to_string()),
            ],
        );

        let result: Result<AdminModel, ServiceError> = async {
            self.ensure_email_free(&req.email, Some(id)).await?;
            self.ensure_role_exists(req.role_id).await?;

            let hashed = match req.password.as_deref().filter(|p| !p.is_empty()) {
                Some(password) => Some(self.deps.hashing.hash_password(password).await?),
                None => None,
            };

            Ok(self
                .deps
                .admins
                .update_admin(id, req, hashed.as_deref())
                .await?)
        }
        .await;

        self.finish(&tracing_ctx, Method::Put, result, "Account updated successfully")
    }

    async fn trash_admin(
        &self,
        acting_admin_id: i32,
        id: i32,
    ) -> Result<ApiResponse<AdminResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "trash_admin",
            vec![
                KeyValue::new("component", "admin"),
                KeyValue::new("admin.id", id.to_string()),
                KeyValue::new("admin.acting", acting_admin_id.to_string()),
            ],
        );

        let result = if acting_admin_id == id {
            Err(ServiceError::Forbidden(
                "You cannot delete your own account".to_string(),
            ))
        } else {
            self.deps
                .admins
                .trash_admin(id)
                .await
                .map_err(ServiceError::Repo)
        };

        self.finish(&tracing_ctx, Method::Delete, result, "Account moved to trash")
    }
}
