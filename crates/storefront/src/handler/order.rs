use crate::middleware::{
    client_ip::client_ip,
    jwt::{CurrentCustomer, MaybeCustomer, customer_auth, optional_customer},
    validate::{SimpleValidatedJson, ValidatedQuery},
};
use axum::{
    Extension, Json,
    extract::{ConnectInfo, Path},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        requests::{CreateOrderRequest, PageQuery},
        responses::{ApiResponse, ApiResponsePagination, CreateOrderResponse, OrderResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::{net::SocketAddr, sync::Arc};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<CreateOrderResponse>),
        (status = 400, description = "Prices changed or promotion not applicable")
    ),
    tag = "Order"
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(MaybeCustomer(customer_id)): Extension<MaybeCustomer>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let ip = client_ip(&headers, peer);
    let response = service.create_order(customer_id, &body, &ip).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{code}",
    params(("code" = String, Path, description = "Order code")),
    responses(
        (status = 200, description = "Order tracking", body = ApiResponse<OrderResponse>),
        (status = 404, description = "Order not found")
    ),
    tag = "Order"
)]
pub async fn track_order(
    Extension(service): Extension<DynOrderQueryService>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_code(&code).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(PageQuery),
    responses(
        (status = 200, description = "Orders of the signed-in customer", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn my_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
    ValidatedQuery(params): ValidatedQuery<PageQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_my_orders(customer_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{code}/cancel",
    params(("code" = String, Path, description = "Order code")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Order is no longer pending"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn cancel_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.cancel_order(customer_id, &code).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let checkout = OpenApiRouter::new()
        .route("/api/orders", post(create_order))
        .route_layer(middleware::from_fn(optional_customer));

    let tracking = OpenApiRouter::new().route("/api/orders/{code}", get(track_order));

    let private_routes = OpenApiRouter::new()
        .route("/api/orders", get(my_orders))
        .route("/api/orders/{code}/cancel", post(cancel_order))
        .route_layer(middleware::from_fn(customer_auth));

    checkout
        .merge(tracking)
        .merge(private_routes)
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
