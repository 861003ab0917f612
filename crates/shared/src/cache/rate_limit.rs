use async_trait::async_trait;
use chrono::Duration;
use tracing::{debug, error};

use crate::{abstract_trait::RateLimiterTrait, cache::CacheStore};

/// Per-key request counters in Redis; the key expires with its window.
#[derive(Clone)]
pub struct RateLimiter {
    cache: CacheStore,
}

impl RateLimiter {
    pub fn new(cache: CacheStore) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl RateLimiterTrait for RateLimiter {
    async fn check_rate_limit(&self, key: &str, max_requests: u32, window_seconds: u32) -> (bool, u32) {
        let current = match self
            .cache
            .increment(key, Duration::seconds(window_seconds as i64))
            .await
        {
            Ok(current) => current,
            Err(e) => {
                // Closed: an unreachable Redis must not lift the limit.
                error!("❌ Rate limit check failed for '{key}': {e:?}");
                return (false, 0);
            }
        };

        if current > max_requests {
            debug!("Rate limit exceeded for key: {key}");
            return (false, current);
        }

        (true, current)
    }
}
