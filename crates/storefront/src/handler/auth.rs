use crate::middleware::{
    jwt::{CurrentCustomer, TOKEN_COOKIE, customer_auth},
    rate_limit::auth_rate_limit,
    validate::SimpleValidatedJson,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use shared::{
    abstract_trait::DynAuthService,
    domain::{
        requests::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest},
        responses::{ApiResponse, CustomerResponse, TokenResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

/// Session cookie carrying the access token; the browser never reads it.
pub fn token_cookie(name: &'static str, token: String) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn expired_token_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account locked")
    ),
    tag = "Auth"
)]
pub async fn login_handler(
    Extension(service): Extension<DynAuthService>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    let jar = jar.add(token_cookie(TOKEN_COOKIE, response.data.access_token.clone()));
    Ok((StatusCode::OK, jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Token cookie cleared", body = ApiResponse<serde_json::Value>)),
    tag = "Auth"
)]
pub async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    (
        jar.remove(expired_token_cookie(TOKEN_COOKIE)),
        Json(ApiResponse::success("Logged out", ())),
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "OTP sent", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "No account with this email")
    ),
    tag = "Auth"
)]
pub async fn forgot_password_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.forgot_password(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "OTP incorrect or expired"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Auth"
)]
pub async fn reset_password_handler(
    Extension(service): Extension<DynAuthService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reset_password(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Signed-in customer", body = ApiResponse<CustomerResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me_handler(
    Extension(service): Extension<DynAuthService>,
    Extension(CurrentCustomer(customer_id)): Extension<CurrentCustomer>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.me(customer_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/forgot-password", post(forgot_password_handler))
        .route("/api/auth/reset-password", post(reset_password_handler))
        .route_layer(middleware::from_fn(auth_rate_limit));

    let private_routes = OpenApiRouter::new()
        .route("/api/auth/me", get(me_handler))
        .route_layer(middleware::from_fn(customer_auth));

    public_routes
        .merge(private_routes)
        .layer(Extension(app_state.di_container.auth_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
        .layer(Extension(app_state.rate_limiter.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cookie_is_http_only() {
        let cookie = token_cookie(TOKEN_COOKIE, "abc".to_string());

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
