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
    abstract_trait::{DynPermissionService, DynPromotionService},
    domain::{
        requests::{FindAllRecords, PromotionRequest},
        responses::{ApiResponse, ApiResponsePagination, PromotionResponse},
    },
    errors::HttpError,
    service::{PROMOTIONS_EDIT, PROMOTIONS_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/promotions",
    params(FindAllRecords),
    responses((status = 200, description = "Promotions", body = ApiResponsePagination<Vec<PromotionResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_list_promotions(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_VIEW).await?;
    let response = service.find_all(&params, false).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/promotions/trashed",
    params(FindAllRecords),
    responses((status = 200, description = "Soft-deleted promotions", body = ApiResponsePagination<Vec<PromotionResponse>>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_trashed_promotions(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_VIEW).await?;
    let response = service.find_all(&params, true).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/promotions/{id}",
    params(("id" = i32, Path, description = "Promotion ID")),
    responses(
        (status = 200, description = "Promotion detail", body = ApiResponse<PromotionResponse>),
        (status = 404, description = "Promotion not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_get_promotion(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/promotions",
    request_body = PromotionRequest,
    responses((status = 201, description = "Promotion created", body = ApiResponse<PromotionResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_create_promotion(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    SimpleValidatedJson(body): SimpleValidatedJson<PromotionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_EDIT).await?;
    let response = service.create_promotion(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/admin/promotions/{id}",
    params(("id" = i32, Path, description = "Promotion ID")),
    request_body = PromotionRequest,
    responses((status = 200, description = "Promotion updated", body = ApiResponse<PromotionResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_update_promotion(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<PromotionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_EDIT).await?;
    let response = service.update_promotion(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/promotions/{id}",
    params(("id" = i32, Path, description = "Promotion ID")),
    responses((status = 200, description = "Promotion moved to trash", body = ApiResponse<PromotionResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_trash_promotion(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_EDIT).await?;
    let response = service.trash_promotion(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/promotions/{id}/restore",
    params(("id" = i32, Path, description = "Promotion ID")),
    responses((status = 200, description = "Promotion restored", body = ApiResponse<PromotionResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Promotion"
)]
pub async fn admin_restore_promotion(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynPromotionService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, PROMOTIONS_EDIT).await?;
    let response = service.restore_promotion(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_promotion_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/admin/promotions",
            get(admin_list_promotions).post(admin_create_promotion),
        )
        .route("/admin/promotions/trashed", get(admin_trashed_promotions))
        .route(
            "/admin/promotions/{id}",
            get(admin_get_promotion)
                .put(admin_update_promotion)
                .delete(admin_trash_promotion),
        )
        .route("/admin/promotions/{id}/restore", patch(admin_restore_promotion))
        .layer(Extension(app_state.di_container.promotion_service.clone()))
}
