use crate::middleware::{
    jwt::{CurrentCustomer, customer_auth},
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get},
};
use shared::{
    abstract_trait::DynCartService,
    domain::{
        requests::AddToCartRequest,
        responses::{ApiResponse, CartResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    responses(
        (status = 200, description = "Current cart", body = ApiResponse<CartResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(customer_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Lines merged into the cart", body = ApiResponse<CartResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
    SimpleValidatedJson(body): SimpleValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_items(customer_id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    params(("product_id" = i32, Path, description = "Product to drop from the cart")),
    responses(
        (status = 200, description = "Line removed", body = ApiResponse<CartResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
    Path(product_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_item(customer_id, product_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    responses(
        (status = 200, description = "Cart emptied", body = ApiResponse<CartResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Cart"
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.clear_cart(customer_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/api/cart/items/{product_id}", delete(remove_cart_item))
        .route_layer(middleware::from_fn(customer_auth))
        .layer(Extension(app_state.di_container.cart_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
