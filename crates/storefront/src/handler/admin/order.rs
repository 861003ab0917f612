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
    abstract_trait::{DynOrderCommandService, DynOrderQueryService, DynPermissionService},
    domain::{
        requests::{FindAllRecords, UpdateOrderStatusRequest, UpdatePaymentStatusRequest},
        responses::{ApiResponse, ApiResponsePagination, OrderResponse},
    },
    errors::HttpError,
    service::{ORDERS_EDIT, ORDERS_VIEW},
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/admin/orders",
    params(FindAllRecords),
    responses(
        (status = 200, description = "Orders, newest first; `status` filters, `search` matches code, name or phone", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 403, description = "Missing orders_view")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Order"
)]
pub async fn admin_list_orders(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynOrderQueryService>,
    ValidatedQuery(params): ValidatedQuery<FindAllRecords>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ORDERS_VIEW).await?;
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/admin/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Order"
)]
pub async fn admin_get_order(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynOrderQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ORDERS_VIEW).await?;
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/orders/{id}/status",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status moved", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Order already completed or cancelled"),
        (status = 409, description = "Order changed concurrently")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Order"
)]
pub async fn admin_order_status(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ORDERS_EDIT).await?;
    let response = service.update_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/admin/orders/{id}/payment-status",
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdatePaymentStatusRequest,
    responses((status = 200, description = "Payment status set", body = ApiResponse<OrderResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Order"
)]
pub async fn admin_order_payment_status(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ORDERS_EDIT).await?;
    let response = service.update_payment_status(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/admin/orders/{id}",
    params(("id" = i32, Path, description = "Order ID")),
    responses((status = 200, description = "Order moved to trash", body = ApiResponse<OrderResponse>)),
    security(("bearer_auth" = [])),
    tag = "Admin Order"
)]
pub async fn admin_trash_order(
    Extension(permissions): Extension<DynPermissionService>,
    Extension(admin): Extension<CurrentAdmin>,
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require(&permissions, admin, ORDERS_EDIT).await?;
    let response = service.trash_order(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/orders", get(admin_list_orders))
        .route(
            "/admin/orders/{id}",
            get(admin_get_order).delete(admin_trash_order),
        )
        .route("/admin/orders/{id}/status", patch(admin_order_status))
        .route(
            "/admin/orders/{id}/payment-status",
            patch(admin_order_payment_status),
        )
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
}
