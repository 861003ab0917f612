use axum::{
    Extension, Json,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    config::{SCOPE_ADMIN, SCOPE_CUSTOMER},
    errors::ErrorResponse,
};

/// Storefront session cookie.
pub const TOKEN_COOKIE: &str = "token";
/// Back-office session cookie, kept apart so both logins can coexist.
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

/// Customer id taken from a verified `customer` token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentCustomer(pub i32);

/// Back-office account id taken from a verified `admin` token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentAdmin(pub i32);

/// Set on routes where signing in is optional, e.g. checkout.
#[derive(Debug, Clone, Copy)]
pub struct MaybeCustomer(pub Option<i32>);

type Rejection = (StatusCode, Json<ErrorResponse>);

fn unauthorized(message: &str) -> Rejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
}

fn cookie_for(scope: &str) -> &'static str {
    if scope == SCOPE_ADMIN {
        ADMIN_TOKEN_COOKIE
    } else {
        TOKEN_COOKIE
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|auth_header| auth_header.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}

/// Tokens to try for `scope`: its cookie first, then `Authorization: Bearer`.
pub fn extract_tokens(cookie_jar: &CookieJar, headers: &HeaderMap, scope: &str) -> Vec<String> {
    cookie_jar
        .get(cookie_for(scope))
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .into_iter()
        .chain(bearer_token(headers))
        .collect()
}

fn verify(
    cookie_jar: &CookieJar,
    headers: &HeaderMap,
    jwt: &DynJwtService,
    scope: &str,
) -> Result<i32, Rejection> {
    let tokens = extract_tokens(cookie_jar, headers, scope);
    if tokens.is_empty() {
        return Err(unauthorized("You are not logged in, please provide token"));
    }

    // A stale cookie must not shadow a valid header.
    tokens
        .iter()
        .find_map(|token| jwt.verify_token(token, scope).ok())
        .map(|id| id as i32)
        .ok_or_else(|| unauthorized("Invalid token"))
}

pub async fn customer_auth(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, Rejection> {
    let customer_id = verify(&cookie_jar, req.headers(), &jwt, SCOPE_CUSTOMER)?;

    req.extensions_mut().insert(CurrentCustomer(customer_id));

    Ok(next.run(req).await)
}

pub async fn admin_auth(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, Rejection> {
    let admin_id = verify(&cookie_jar, req.headers(), &jwt, SCOPE_ADMIN)?;

    req.extensions_mut().insert(CurrentAdmin(admin_id));

    Ok(next.run(req).await)
}

/// Never rejects: a missing or invalid token just means a guest.
pub async fn optional_customer(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let customer_id = verify(&cookie_jar, req.headers(), &jwt, SCOPE_CUSTOMER).ok();

    req.extensions_mut().insert(MaybeCustomer(customer_id));

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum_extra::extract::cookie::Cookie;
    use shared::config::JwtConfig;
    use std::sync::Arc;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    fn jwt() -> DynJwtService {
        Arc::new(JwtConfig::new("middleware-test-secret")) as DynJwtService
    }

    #[test]
    fn cookie_is_tried_before_bearer_header() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, "from-cookie"));

        assert_eq!(
            extract_tokens(&jar, &bearer("from-header"), SCOPE_CUSTOMER),
            vec!["from-cookie".to_string(), "from-header".to_string()]
        );
    }

    #[test]
    fn each_scope_reads_its_own_cookie() {
        let jar = CookieJar::new()
            .add(Cookie::new(TOKEN_COOKIE, "shopper"))
            .add(Cookie::new(ADMIN_TOKEN_COOKIE, "staff"));

        assert_eq!(
            extract_tokens(&jar, &HeaderMap::new(), SCOPE_CUSTOMER),
            vec!["shopper".to_string()]
        );
        assert_eq!(
            extract_tokens(&jar, &HeaderMap::new(), SCOPE_ADMIN),
            vec!["staff".to_string()]
        );
    }

    #[test]
    fn cleared_cookie_counts_as_missing() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, ""));

        assert!(extract_tokens(&jar, &HeaderMap::new(), SCOPE_CUSTOMER).is_empty());
    }

    #[test]
    fn customer_cookie_does_not_shadow_admin_bearer() {
        let jwt = jwt();
        let customer = jwt.generate_token(7, SCOPE_CUSTOMER).unwrap();
        let admin = jwt.generate_token(3, SCOPE_ADMIN).unwrap();

        // Signed in as a shopper in the same browser.
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, customer.clone()));

        assert_eq!(verify(&jar, &bearer(&admin), &jwt, SCOPE_ADMIN).unwrap(), 3);
        assert_eq!(
            verify(&jar, &HeaderMap::new(), &jwt, SCOPE_CUSTOMER).unwrap(),
            7
        );
    }

    #[test]
    fn stale_admin_cookie_falls_back_to_bearer() {
        let jwt = jwt();
        let admin = jwt.generate_token(3, SCOPE_ADMIN).unwrap();
        let jar = CookieJar::new().add(Cookie::new(ADMIN_TOKEN_COOKIE, "expired.or.garbage"));

        assert_eq!(verify(&jar, &bearer(&admin), &jwt, SCOPE_ADMIN).unwrap(), 3);
    }

    #[test]
    fn wrong_scope_everywhere_is_rejected() {
        let jwt = jwt();
        let customer = jwt.generate_token(7, SCOPE_CUSTOMER).unwrap();
        let jar = CookieJar::new().add(Cookie::new(ADMIN_TOKEN_COOKIE, customer.clone()));

        let (status, _) = verify(&jar, &bearer(&customer), &jwt, SCOPE_ADMIN).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
