use anyhow::{Context, Result};
use chrono::Duration;
use deadpool_redis::{Connection, Pool};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, error};

/// JSON values in Redis behind the deadpool connection pool.
#[derive(Clone)]
pub struct CacheStore {
    redis_pool: Pool,
}

impl CacheStore {
    pub fn new(redis_pool: Pool) -> Self {
        Self { redis_pool }
    }

    async fn get_conn(&self) -> Result<Connection> {
        self.redis_pool
            .get()
            .await
            .context("Failed to get Redis pooled connection")
    }

    pub async fn get_from_cache<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("❌ {e:?}");
                return None;
            }
        };

        let result: redis::RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;

        match result {
            Ok(Some(data)) => serde_json::from_str::<T>(&data)
                .inspect_err(|e| error!("❌ Failed to deserialize cached value for '{key}': {e}"))
                .ok(),
            Ok(None) => {
                debug!("Cache miss for key: {key}");
                None
            }
            Err(e) => {
                error!("❌ Redis GET failed for '{key}': {e}");
                None
            }
        }
    }

    /// Stores `data` with a TTL and reports failure to the caller.
    pub async fn try_set_to_cache<T>(&self, key: &str, data: &T, expiration: Duration) -> Result<()>
    where
        T: Serialize,
    {
        let json_data = serde_json::to_string(data)
            .with_context(|| format!("Failed to serialize value for '{key}'"))?;

        let mut conn = self.get_conn().await?;

        redis::cmd("SET")
            .arg(key)
            .arg(&json_data)
            .arg("EX")
            .arg(expiration.num_seconds().max(1))
            .query_async::<()>(&mut conn)
            .await
            .with_context(|| format!("Failed to set cache key '{key}'"))?;

        debug!("Cached key '{key}' with TTL {expiration:?}");
        Ok(())
    }

    /// Bumps a counter and (re)arms its TTL in one atomic pipeline.
    pub async fn increment(&self, key: &str, expiration: Duration) -> Result<u32> {
        let mut conn = self.get_conn().await?;

        let (current,): (u32,) = redis::pipe()
            .atomic()
            .cmd("INCR")
            .arg(key)
            .cmd("EXPIRE")
            .arg(key)
            .arg(expiration.num_seconds().max(1))
            .ignore()
            .query_async(&mut conn)
            .await
            .with_context(|| format!("Failed to increment '{key}'"))?;

        Ok(current)
    }

    pub async fn delete_from_cache(&self, key: &str) {
        match self.get_conn().await {
            Ok(mut conn) => {
                if let Err(e) = redis::cmd("DEL").arg(key).query_async::<()>(&mut conn).await {
                    error!("❌ Failed to delete key '{key}': {e}");
                }
            }
            Err(e) => error!("❌ {e:?}"),
        }
    }
}
