use anyhow::{Context, Result};
use dotenv::dotenv;
use email::SmtpMailer;
use shared::{
    abstract_trait::DynEmailService,
    config::{Config, ConnectionManager, ConnectionPool},
    state::AppState,
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use storefront::handler::AppRouter;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("storefront", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    init_logger(telemetry.logger_provider(), "storefront", is_dev, is_enable_file);

    info!("🚀 Starting storefront initialization...");

    let pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let mailer = SmtpMailer::new(&config.email).context("Failed to create SMTP mailer")?;
    let email = Arc::new(mailer) as DynEmailService;

    let state = AppState::new(pool, &config, email)
        .await
        .context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    info!("🛑 Shutting down storefront...");

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    served
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Database migrations applied");
    Ok(())
}
