use crate::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService, DynRateLimiter},
    cache::{CacheStore, RateLimiter},
    config::{Config, ConnectionPool, Hashing, JwtConfig, RedisClient},
    di::{DependenciesInject, DependenciesInjectDeps},
    utils::{SystemMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub rate_limiter: DynRateLimiter,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &"<dyn JwtService>")
            .field("rate_limiter", &"<dyn RateLimiter>")
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config, email: DynEmailService) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let hashing = Arc::new(Hashing::new()) as DynHashing;
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let redis = RedisClient::new(&config.redis).context("Failed to connect to Redis")?;

        redis
            .ping()
            .await
            .context("Failed to ping Redis server")?;

        let rate_limiter =
            Arc::new(RateLimiter::new(CacheStore::new(redis.pool.clone()))) as DynRateLimiter;

        let deps = DependenciesInjectDeps {
            pool,
            redis,
            hash: hashing,
            jwt_config: jwt_config.clone(),
            email,
            vnpay: config.vnpay.clone(),
            client_url: config.client_url.clone(),
            registry: registry.clone(),
        };

        let di_container = DependenciesInject::new(deps).await;

        system_metrics.register(&mut *registry.lock().await);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            jwt_config,
            rate_limiter,
            registry,
            system_metrics,
        })
    }
}
