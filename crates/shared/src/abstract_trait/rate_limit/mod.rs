use async_trait::async_trait;
use std::sync::Arc;

pub type DynRateLimiter = Arc<dyn RateLimiterTrait + Send + Sync>;

/// Fixed-window request counter keyed by caller.
#[async_trait]
pub trait RateLimiterTrait {
    /// Counts one request against `key`; returns whether it is admitted and the
    /// running count for the window.
    async fn check_rate_limit(&self, key: &str, max_requests: u32, window_seconds: u32) -> (bool, u32);
}
