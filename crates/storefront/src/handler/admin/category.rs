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
    routing::{get, patch},
};
use shared::{
    abstract_trait::{DynCategoryService, DynPermissionService},
    domain::{
        requests::{CategoryRequest, FindAllRecords, UpdateStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, CategoryResponse},
    },
    errors::HttpError,
    service::{CATEGORIES_EDIT, CATEGORIES_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/categories",
    params(FindAllRecords),
    responses((status = 200, description = "Categories", body = ApiResponsePagination<Vec<CategoryResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_list_categories(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_VIEW).await?;
    let response = service.find_all(&params, false).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/categories/trashed",
    params(FindAllRecords),
    responses((status = 200, description = "Soft-deleted categories", body = ApiResponsePagination<Vec<CategoryResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_trashed_categories(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_VIEW).await?;
    let response = service.find_all(&params, true).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category detail", body = ApiResponse<CategoryResponse>),
        (status = 404, description = "Category not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_get_category(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CategoryRequest,
    responses((status = 201, description = "Category created", body = ApiResponse<CategoryResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_create_category(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_EDIT).await?;
    let response = service.create_category(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses((status = 200, description = "Category updated", body = ApiResponse<CategoryResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_update_category(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CategoryRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_EDIT).await?;
    let response = service.update_category(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/categories/{id}/status",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateStatusRequest,
    responses((status = 200, description = "Status changed", body = ApiResponse<CategoryResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_category_status(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_EDIT).await?;
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(("id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Category moved to trash", body = ApiResponse<CategoryResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_trash_category(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_EDIT).await?;
    let response = service.trash_category(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/categories/{id}/restore",
    params(("id" = i32, Path, description = "Category ID")),
    responses((status = 200, description = "Category restored", body = ApiResponse<CategoryResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Category"
)]
pub async fn admin_restore_category(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynCategoryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, CATEGORIES_EDIT).await?;
    let response = service.restore_category(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_category_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/admin/categories",
            get(admin_list_categories).post(admin_create_category),
        )
        .route("/admin/categories/trashed", get(admin_trashed_categories))
        .route(
            "/admin/categories/{id}",
            get(admin_get_category)
                .put(admin_update_category)
                .delete(admin_trash_category),
        )
        .route("/admin/categories/{id}/status", patch(admin_category_status))
        .route("/admin/categories/{id}/restore", patch(admin_restore_category))
        .layer(Extension(app_state.di_container.category_service.clone()))
}
