use anyhow::{Context, Result};
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: u8,
    pub password: Option<String>,
}

impl RedisConfig {
    pub fn new(host: String, port: u16, db: u8, password: Option<String>) -> Self {
        Self {
            host,
            port,
            db,
            password,
        }
    }

    pub fn init() -> Result<Self> {
        let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = std::env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let db = std::env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let password = std::env::var("REDIS_PASSWORD")
            .ok()
            .filter(|pw| !pw.is_empty());

        Ok(Self::new(host, port, db, password))
    }

    pub fn url(&self) -> String {
        match &self.password {
            Some(pw) => format!("redis://:{}@{}:{}/{}", pw, self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

#[derive(Clone)]
pub struct RedisClient {
    pub pool: Pool,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> Result<Self> {
        info!("Creating redis pool");

        let pool = PoolConfig::from_url(config.url())
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis pool")?;

        Ok(Self { pool })
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to get redis connection")?;

        info!("Pinging redis");

        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!("Pinged redis");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_includes_password_when_present() {
        let config = RedisConfig::new("cache".into(), 6380, 2, Some("pw".into()));
        assert_eq!(config.url(), "redis://:pw@cache:6380/2");
    }

    #[test]
    fn url_omits_password_when_absent() {
        let config = RedisConfig::new("localhost".into(), 6379, 0, None);
        assert_eq!(config.url(), "redis://localhost:6379/0");
    }
}
