use crate::middleware::client_ip::client_ip;
use axum::{
    Extension,
    body::Body,
    extract::ConnectInfo,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use shared::{abstract_trait::DynRateLimiter, errors::HttpError};
use std::net::SocketAddr;
use tracing::warn;

/// Auth calls admitted per client address in one window.
pub const AUTH_MAX_REQUESTS: u32 = 20;
pub const AUTH_WINDOW_SECONDS: u32 = 60;

fn rate_limit_key(ip: &str) -> String {
    format!("rate_limit:auth:{ip}")
}

pub async fn admit(limiter: &DynRateLimiter, ip: &str) -> Result<(), HttpError> {
    let (allowed, current) = limiter
        .check_rate_limit(&rate_limit_key(ip), AUTH_MAX_REQUESTS, AUTH_WINDOW_SECONDS)
        .await;

    if !allowed {
        warn!("🚦 Rate limit exceeded for IP: {ip} (requests: {current})");
        return Err(HttpError::TooManyRequests(
            "Too many requests, please try again later".to_string(),
        ));
    }

    Ok(())
}

/// Throttles credential and OTP endpoints per client address.
pub async fn auth_rate_limit(
    Extension(limiter): Extension<DynRateLimiter>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let ip = client_ip(req.headers(), peer);
    admit(&limiter, &ip).await?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use shared::abstract_trait::RateLimiterTrait;
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };

    #[derive(Default)]
    struct CountingLimiter {
        counts: Mutex<HashMap<String, u32>>,
    }

    #[async_trait]
    impl RateLimiterTrait for CountingLimiter {
        async fn check_rate_limit(&self, key: &str, max_requests: u32, _window: u32) -> (bool, u32) {
            let mut counts = self.counts.lock().unwrap();
            let current = counts.entry(key.to_string()).or_insert(0);
            *current += 1;
            (*current <= max_requests, *current)
        }
    }

    struct DownLimiter;

    #[async_trait]
    impl RateLimiterTrait for DownLimiter {
        async fn check_rate_limit(&self, _key: &str, _max: u32, _window: u32) -> (bool, u32) {
            (false, 0)
        }
    }

    #[tokio::test]
    async fn blocks_after_the_window_budget() {
        let limiter = Arc::new(CountingLimiter::default()) as DynRateLimiter;

        for _ in 0..AUTH_MAX_REQUESTS {
            admit(&limiter, "203.0.113.9").await.unwrap();
        }

        let err = admit(&limiter, "203.0.113.9").await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        // Other callers keep their own budget.
        admit(&limiter, "198.51.100.4").await.unwrap();
    }

    #[tokio::test]
    async fn unavailable_counter_refuses() {
        let limiter = Arc::new(DownLimiter) as DynRateLimiter;

        assert!(admit(&limiter, "203.0.113.9").await.is_err());
    }

    #[test]
    fn keys_are_scoped_to_auth() {
        assert_eq!(rate_limit_key("10.0.0.7"), "rate_limit:auth:10.0.0.7");
    }
}
