use crate::middleware::{client_ip::client_ip, validate::SimpleValidatedJson};
use axum::{
    Extension, Json,
    extract::{ConnectInfo, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::DynPaymentService,
    domain::{
        requests::CreatePaymentRequest,
        responses::{ApiResponse, PaymentResultResponse, PaymentUrlResponse},
    },
    errors::HttpError,
    state::AppState,
    vnpay::IpnResponse,
};
use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/payments/vnpay",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Signed VNPay redirect URL", body = ApiResponse<PaymentUrlResponse>),
        (status = 400, description = "Order cannot be paid online"),
        (status = 404, description = "Order not found")
    ),
    tag = "Payment"
)]
pub async fn create_payment_url(
    Extension(service): Extension<DynPaymentService>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    SimpleValidatedJson(body): SimpleValidatedJson<CreatePaymentRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let ip = client_ip(&headers, peer);
    let response = service.create_payment_url(&body, &ip).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/payments/vnpay/return",
    responses(
        (status = 200, description = "Payment outcome for the browser", body = ApiResponse<PaymentResultResponse>),
        (status = 400, description = "Signature or amount mismatch")
    ),
    tag = "Payment"
)]
pub async fn vnpay_return(
    Extension(service): Extension<DynPaymentService>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.vnpay_return(&query).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// VNPay always expects 200 with `{RspCode, Message}`.
#[utoipa::path(
    get,
    path = "/api/payments/vnpay/ipn",
    responses((status = 200, description = "IPN acknowledgement", body = IpnResponse)),
    tag = "Payment"
)]
pub async fn vnpay_ipn(
    Extension(service): Extension<DynPaymentService>,
    Query(query): Query<BTreeMap<String, String>>,
) -> impl IntoResponse {
    (StatusCode::OK, Json(service.vnpay_ipn(&query).await))
}

pub fn payment_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/payments/vnpay", post(create_payment_url))
        .route("/api/payments/vnpay/return", get(vnpay_return))
        .route("/api/payments/vnpay/ipn", get(vnpay_ipn))
        .layer(Extension(app_state.di_container.payment_service.clone()))
}
