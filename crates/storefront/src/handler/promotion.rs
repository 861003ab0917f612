use crate::middleware::validate::SimpleValidatedJson;
use axum::{Extension, Json, http::StatusCode, response::IntoResponse, routing::post};
use shared::{
    abstract_trait::DynPromotionService,
    domain::{requests::CheckPromotionRequest, responses::ApiResponse},
    errors::HttpError,
    pricing::PromotionQuote,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/promotions/check",
    request_body = CheckPromotionRequest,
    responses(
        (status = 200, description = "Discount the code gives on this sub total", body = ApiResponse<PromotionQuote>),
        (status = 400, description = "Code expired, inactive or below its minimum"),
        (status = 404, description = "Unknown code")
    ),
    tag = "Promotion"
)]
pub async fn check_promotion(
    Extension(service): Extension<DynPromotionService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CheckPromotionRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.check_code(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn promotion_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/promotions/check", post(check_promotion))
        .layer(Extension(app_state.di_container.promotion_service.clone()))
}
