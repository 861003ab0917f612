use super::require;
use crate::middleware::{jwt::CurrentAdmin, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use shared::{
    abstract_trait::{DynPermissionService, DynRoleService},
    domain::{
        requests::{RoleRequest, UpdatePermissionsRequest},
        responses::{ApiResponse, RoleResponse},
    },
    errors::HttpError,
    service::{ROLES_EDIT, ROLES_PERMISSIONS, ROLES_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/roles",
    responses((status = 200, description = "Roles", body = ApiResponse<Vec<RoleResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_list_roles(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynRoleService>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_VIEW).await?;
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role detail", body = ApiResponse<RoleResponse>),
        (status = 404, description = "Role not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_get_role(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynRoleService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/roles",
    request_body = RoleRequest,
    responses((status = 201, description = "Role created", body = ApiResponse<RoleResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_create_role(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynRoleService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RoleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_EDIT).await?;
    let response = service.create_role(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role ID")),
    request_body = RoleRequest,
    responses((status = 200, description = "Role updated", body = ApiResponse<RoleResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_update_role(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynRoleService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<RoleRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_EDIT).await?;
    let response = service.update_role(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/roles/{id}",
    params(("id" = i32, Path, description = "Role ID")),
    responses((status = 200, description = "Role moved to trash", body = ApiResponse<RoleResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_trash_role(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynRoleService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_EDIT).await?;
    let response = service.trash_role(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/roles/{id}/permissions",
    params(("id" = i32, Path, description = "Role ID")),
    request_body = UpdatePermissionsRequest,
    responses(
        (status = 200, description = "Permission set replaced", body = ApiResponse<RoleResponse>),
        (status = 400, description = "Unknown permission code")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_role_permissions(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdatePermissionsRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_PERMISSIONS).await?;
    let response = permissions.update_permissions(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/permissions",
    responses((status = 200, description = "Every permission code", body = ApiResponse<Vec<String>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Role"
)]
pub async fn admin_permission_catalog(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ROLES_PERMISSIONS).await?;
    Ok((StatusCode::OK, Json(permissions.catalog())))
}

pub fn admin_role_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/roles", get(admin_list_roles).post(admin_create_role))
        .route(
            "/admin/roles/{id}",
            get(admin_get_role)
                .put(admin_update_role)
                .delete(admin_trash_role),
        )
        .route("/admin/roles/{id}/permissions", put(admin_role_permissions))
        .route("/admin/permissions", get(admin_permission_catalog))
        .layer(Extension(app_state.di_container.role_service.clone()))
}
