mod cache_store;
mod otp;
mod rate_limit;

pub use self::cache_store::CacheStore;
pub use self::otp::OtpStore;
pub use self::rate_limit::RateLimiter;
