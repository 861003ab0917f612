use anyhow::{Context, Result, anyhow};

use crate::config::RedisConfig;

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_user =
            std::env::var("SMTP_USERNAME").context("Missing environment variable: SMTP_USERNAME")?;
        let smtp_pass =
            std::env::var("SMTP_PASSWORD").context("Missing environment variable: SMTP_PASSWORD")?;
        let smtp_server =
            std::env::var("SMTP_HOST").context("Missing environment variable: SMTP_HOST")?;
        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| smtp_user.clone());

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VnpayConfig {
    pub tmn_code: String,
    pub hash_secret: String,
    pub payment_url: String,
    pub return_url: String,
}

impl VnpayConfig {
    pub fn init() -> Result<Self> {
        let tmn_code =
            std::env::var("VNP_TMN_CODE").context("Missing environment variable: VNP_TMN_CODE")?;
        let hash_secret = std::env::var("VNP_HASH_SECRET")
            .context("Missing environment variable: VNP_HASH_SECRET")?;
        let payment_url = std::env::var("VNP_URL").unwrap_or_else(|_| {
            "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string()
        });
        let return_url = std::env::var("VNP_RETURN_URL")
            .context("Missing environment variable: VNP_RETURN_URL")?;

        Ok(Self {
            tmn_code,
            hash_secret,
            payment_url,
            return_url,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub client_url: String,
    pub otel_endpoint: String,
    pub email: EmailConfig,
    pub redis: RedisConfig,
    pub vnpay: VnpayConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_max_conn: u32 = std::env::var("DB_MAX_CONNECTION")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MAX_CONNECTION as u32")?;

        let db_min_conn: u32 = std::env::var("DB_MIN_CONNECTION")
            .unwrap_or_else(|_| "1".to_string())
            .parse::<u32>()
            .context("Unable to parse DB_MIN_CONNECTION as u32")?;

        let client_url =
            std::env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let otel_endpoint = std::env::var("OTEL_ENDPOINT")
            .unwrap_or_else(|_| "http://otel-collector:4317".to_string());

        let email = EmailConfig::init().context("failed email config")?;
        let redis = RedisConfig::init().context("failed redis config")?;
        let vnpay = VnpayConfig::init().context("failed vnpay config")?;

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            db_max_conn,
            db_min_conn,
            client_url,
            otel_endpoint,
            email,
            redis,
            vnpay,
        })
    }
}
