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
    abstract_trait::{DynPermissionService, DynProductCommandService, DynProductQueryService},
    domain::{
        requests::{FindAllRecords, ProductRequest, UpdateStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::HttpError,
    service::{PRODUCTS_EDIT, PRODUCTS_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/products",
    params(FindAllRecords),
    responses(
        (status = 200, description = "Products, any status", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 403, description = "Missing products_view")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_list_products(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductQueryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_VIEW).await?;
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/products/trashed",
    params(FindAllRecords),
    responses(
        (status = 200, description = "Soft-deleted products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 403, description = "Missing products_view")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_trashed_products(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductQueryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_VIEW).await?;
    let response = service.find_trashed(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_get_product(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Missing products_edit")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_create_product(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_EDIT).await?;
    let response = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_update_product(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_EDIT).await?;
    let response = service.update_product(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/products/{id}/status",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_product_status(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_EDIT).await?;
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product moved to trash", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_trash_product(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_EDIT).await?;
    let response = service.trash_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/products/{id}/restore",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product restored", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Product"
)]
pub async fn admin_restore_product(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynProductCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PRODUCTS_EDIT).await?;
    let response = service.restore_product(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/admin/products",
            get(admin_list_products).post(admin_create_product),
        )
        .route("/admin/products/trashed", get(admin_trashed_products))
        .route(
            "/admin/products/{id}",
            get(admin_get_product)
                .put(admin_update_product)
                .delete(admin_trash_product),
        )
        .route("/admin/products/{id}/status", patch(admin_product_status))
        .route("/admin/products/{id}/restore", patch(admin_restore_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
