use async_trait::async_trait;
use chrono::Duration;
use tracing::info;

use crate::{abstract_trait::OtpStoreTrait, cache::CacheStore, errors::ServiceError};

fn otp_key(email: &str) -> String {
    format!("otp:reset:{}", email.trim().to_lowercase())
}

fn attempts_key(email: &str) -> String {
    format!("otp:attempts:{}", email.trim().to_lowercase())
}

/// Password reset codes in Redis, expired by key TTL.
#[derive(Clone)]
pub struct OtpStore {
    cache: CacheStore,
}

impl OtpStore {
    pub fn new(cache: CacheStore) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl OtpStoreTrait for OtpStore {
    async fn save_otp(&self, email: &str, otp: &str, ttl_secs: u64) -> Result<(), ServiceError> {
        self.cache
            .try_set_to_cache(&otp_key(email), &otp, Duration::seconds(ttl_secs as i64))
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to store OTP: {e}")))?;
        self.cache.delete_from_cache(&attempts_key(email)).await;

        info!("🔐 Stored reset OTP for {email}");
        Ok(())
    }

    async fn find_otp(&self, email: &str) -> Result<Option<String>, ServiceError> {
        Ok(self.cache.get_from_cache::<String>(&otp_key(email)).await)
    }

    async fn delete_otp(&self, email: &str) -> Result<(), ServiceError> {
        self.cache.delete_from_cache(&otp_key(email)).await;
        self.cache.delete_from_cache(&attempts_key(email)).await;
        Ok(())
    }

    async fn record_failure(&self, email: &str, ttl_secs: u64) -> Result<u32, ServiceError> {
        self.cache
            .increment(&attempts_key(email), Duration::seconds(ttl_secs as i64))
            .await
            .map_err(|e| ServiceError::Internal(format!("Failed to count OTP attempt: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_ignores_case_and_padding() {
        assert_eq!(otp_key(" Lan@Example.com "), "otp:reset:lan@example.com");
        assert_eq!(attempts_key("LAN@example.com"), "otp:attempts:lan@example.com");
    }
}
