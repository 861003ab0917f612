use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::ServiceError;

pub type DynOtpStore = Arc<dyn OtpStoreTrait + Send + Sync>;

/// Short-lived password reset codes keyed by email.
#[async_trait]
pub trait OtpStoreTrait {
    async fn save_otp(&self, email: &str, otp: &str, ttl_secs: u64) -> Result<(), ServiceError>;
    async fn find_otp(&self, email: &str) -> Result<Option<String>, ServiceError>;
    async fn delete_otp(&self, email: &str) -> Result<(), ServiceError>;
    /// Counts a wrong guess against the live code; returns the running total.
    async fn record_failure(&self, email: &str, ttl_secs: u64) -> Result<u32, ServiceError>;
}
