use crate::{
    handler::auth::{expired_token_cookie, token_cookie},
    middleware::{
        jwt::{ADMIN_TOKEN_COOKIE, CurrentAdmin},
        rate_limit::auth_rate_limit,
        validate::SimpleValidatedJson,
    },
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynAdminService,
    domain::{
        requests::LoginRequest,
        responses::{AdminProfileResponse, ApiResponse, TokenResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/admin/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account inactive"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Admin Auth"
)]
pub async fn admin_login(
    Extension(service): Extension<DynAdminService>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    let jar = jar.add(token_cookie(ADMIN_TOKEN_COOKIE, response.data.access_token.clone()));
    Ok((StatusCode::OK, jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/admin/auth/logout",
    responses((status = 200, description = "Admin token cookie cleared", body = ApiResponse<serde_json::Value>)),
    tag = "Admin Auth"
)]
pub async fn admin_logout(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(expired_token_cookie(ADMIN_TOKEN_COOKIE)),
        Json(ApiResponse::success("Logged out", ())),
    )
}

#[utoipa::path(
    get,
    path = "/admin/auth/me",
    responses(
        (status = 200, description = "Signed-in account with its permissions", body = ApiResponse<AdminProfileResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin Auth"
)]
pub async fn admin_me(
    Extension(service): Extension<DynAdminService>,
    Extension(CurrentAdmin(admin_id)): Extension<CurrentAdmin>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.me(admin_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_login_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/auth/login", post(admin_login))
        .route_layer(middleware::from_fn(auth_rate_limit))
        .route("/admin/auth/logout", post(admin_logout))
        .layer(Extension(app_state.di_container.admin_service.clone()))
        .layer(Extension(app_state.rate_limiter.clone()))
}

pub fn admin_session_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/auth/me", get(admin_me))
        .layer(Extension(app_state.di_container.admin_service.clone()))
}
