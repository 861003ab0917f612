use crate::middleware::validate::ValidatedQuery;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::{DynCategoryService, DynProductQueryService},
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ApiResponsePagination, CategoryResponse, ProductResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Products on sale", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Invalid paging")
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    Extension(service): Extension<DynProductQueryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_visible(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/featured",
    responses((status = 200, description = "Featured products", body = ApiResponse<Vec<ProductResponse>>)),
    tag = "Catalog"
)]
pub async fn featured_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_featured().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    responses(
        (status = 200, description = "Product detail", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    ),
    tag = "Catalog"
)]
pub async fn product_detail(
    Extension(service): Extension<DynProductQueryService>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_slug(&slug).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "Active categories", body = ApiResponse<Vec<CategoryResponse>>)),
    tag = "Catalog"
)]
pub async fn list_categories(
    Extension(service): Extension<DynCategoryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_visible().await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn catalog_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products", get(list_products))
        .route("/api/products/featured", get(featured_products))
        .route("/api/products/{slug}", get(product_detail))
        .route("/api/categories", get(list_categories))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.category_service.clone()))
}
