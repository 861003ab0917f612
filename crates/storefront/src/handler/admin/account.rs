use super::require;
use crate::middleware::{
    jwt::CurrentAdmin,
    validate::{SimpleValidatedJson, ValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::{DynAdminService, DynPermissionService},
    domain::{
        requests::{CreateAdminRequest, FindAllRecords, UpdateAdminRequest},
        responses::{AdminResponse, ApiResponse, ApiResponsePagination},
    },
    errors::HttpError,
    service::{ACCOUNTS_EDIT, ACCOUNTS_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/accounts",
    params(FindAllRecords),
    responses((status = 200, description = "Back-office accounts", body = ApiResponsePagination<Vec<AdminResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Account"
)]
pub async fn admin_list_accounts(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynAdminService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ACCOUNTS_VIEW).await?;
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account detail", body = ApiResponse<AdminResponse>),
        (status = 404, description = "Account not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Account"
)]
pub async fn admin_get_account(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ACCOUNTS_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/accounts",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AdminResponse>),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Account"
)]
pub async fn admin_create_account(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynAdminService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ACCOUNTS_EDIT).await?;
    let response = service.create_admin(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateAdminRequest,
    responses((status = 200, description = "Account updated", body = ApiResponse<AdminResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Account"
)]
pub async fn admin_update_account(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynAdminService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateAdminRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ACCOUNTS_EDIT).await?;
    let response = service.update_admin(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/accounts/{id}",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account moved to trash", body = ApiResponse<AdminResponse>),
        (status = 403, description = "Cannot delete own account")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Account"
)]
pub async fn admin_trash_account(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynAdminService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ACCOUNTS_EDIT).await?;
    let response = service.trash_admin(admin.0, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_account_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/admin/accounts",
            get(admin_list_accounts).post(admin_create_account),
        )
        .route(
            "/admin/accounts/{id}",
            get(admin_get_account)
                .put(admin_update_account)
                .delete(admin_trash_account),
        )
        .layer(Extension(app_state.di_container.admin_service.clone()))
}
