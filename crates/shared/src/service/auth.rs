use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
    abstract_trait::{
        AuthServiceTrait, DynCustomerRepository, DynEmailService, DynHashing, DynJwtService,
        DynOtpStore, EmailRequest,
    },
    config::SCOPE_CUSTOMER,
    domain::{
        requests::{ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest},
        responses::{ApiResponse, CustomerResponse, TokenResponse},
        status::CustomerStatus,
    },
    errors::{RepositoryError, ServiceError},
    model::Customer as CustomerModel,
    utils::{EmailTemplateData, Method, ServiceObserver, generate_otp},
};

/// Lifetime of a password reset code.
pub const OTP_TTL_MINUTES: i64 = 5;

/// Wrong guesses tolerated before the live code is burned.
pub const MAX_OTP_ATTEMPTS: u32 = 5;

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub customers: DynCustomerRepository,
    pub hashing: DynHashing,
    pub jwt: DynJwtService,
    pub otp: DynOtpStore,
    pub email: DynEmailService,
}

pub struct AuthService {
    deps: AuthServiceDeps,
    observer: ServiceObserver,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let observer = ServiceObserver::new("auth_service", &registry).await;

        Self { deps, observer }
    }

    /// A live account with the given email, or `NotFound`.
    async fn live_customer(&self, email: &str) -> Result<CustomerModel, ServiceError> {
        match self.deps.customers.find_by_email(email).await? {
            Some(customer) if customer.deleted_at.is_none() => Ok(customer),
            _ => Err(ServiceError::NotFound(format!("No account for {email}"))),
        }
    }

    async fn check_login(&self, req: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let customer = match self.deps.customers.find_by_email(&req.email).await? {
            Some(customer) if customer.deleted_at.is_none() => customer,
            _ => return Err(ServiceError::InvalidCredentials),
        };

        if customer.status == CustomerStatus::Locked.as_str() {
            return Err(ServiceError::Forbidden("Account is locked".to_string()));
        }

        self.deps
            .hashing
            .compare_password(&customer.password, &req.password)
            .await?;

        let access_token = self
            .deps
            .jwt
            .generate_token(customer.customer_id as i64, SCOPE_CUSTOMER)?;

        Ok(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.deps.jwt.expires_in(SCOPE_CUSTOMER),
        })
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        info!("📝 Registering customer {}", req.email);

        let tracing_ctx = self.observer.start(
            "register_customer",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("customer.email", req.email.clone()),
            ],
        );

        let result: Result<CustomerModel, ServiceError> = async {
            if self.deps.customers.find_by_email(&req.email).await?.is_some() {
                return Err(ServiceError::Repo(RepositoryError::AlreadyExists(format!(
                    "Email {} is already registered",
                    req.email
                ))));
            }

            let hashed = self.deps.hashing.hash_password(&req.password).await?;
            Ok(self.deps.customers.create_customer(req, &hashed).await?)
        }
        .await;

        match result {
            Ok(customer) => {
                self.observer
                    .success(&tracing_ctx, Method::Post, "Customer registered");
                Ok(ApiResponse::success(
                    "Registration successful",
                    CustomerResponse::from(customer),
                ))
            }
            Err(err) => {
                error!("❌ Registration of {} failed: {err}", req.email);
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "login_customer",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("customer.email", req.email.clone()),
            ],
        );

        match self.check_login(req).await {
            Ok(token) => {
                info!("🔓 Customer {} logged in", req.email);
                self.observer
                    .success(&tracing_ctx, Method::Post, "Customer logged in");
                Ok(ApiResponse::success("Login successful", token))
            }
            Err(err) => {
                warn!("⚠️ Login refused for {}: {err}", req.email);
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }

    async fn me(&self, customer_id: i32) -> Result<ApiResponse<CustomerResponse>, ServiceError> {
        match self.deps.customers.find_by_id(customer_id).await? {
            Some(customer) => Ok(ApiResponse::success(
                "Profile retrieved successfully",
                CustomerResponse::from(customer),
            )),
            None => Err(ServiceError::NotFound(format!(
                "Customer {customer_id} not found"
            ))),
        }
    }

    async fn forgot_password(
        &self,
        req: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "forgot_password",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("customer.email", req.email.clone()),
            ],
        );

        let result: Result<(CustomerModel, String), ServiceError> = async {
            let customer = self.live_customer(&req.email).await?;
            let otp = generate_otp()
                .map_err(|e| ServiceError::Internal(format!("Failed to generate OTP: {e}")))?;

            self.deps
                .otp
                .save_otp(&customer.email, &otp, (OTP_TTL_MINUTES * 60) as u64)
                .await?;

            Ok((customer, otp))
        }
        .await;

        let (customer, otp) = match result {
            Ok(issued) => issued,
            Err(err) => {
                warn!("⚠️ Password reset refused for {}: {err}", req.email);
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                return Err(err);
            }
        };

        let mail = EmailRequest {
            to: customer.email.clone(),
            data: EmailTemplateData::password_otp(&customer.full_name, &otp, OTP_TTL_MINUTES),
        };

        if let Err(err) = self.deps.email.send(&mail).await {
            error!("❌ Failed to send reset OTP to {}: {err}", customer.email);
        }

        self.observer
            .success(&tracing_ctx, Method::Post, "Reset OTP issued");

        Ok(ApiResponse::success("An OTP has been sent to your email", ()))
    }

    async fn reset_password(
        &self,
        req: &ResetPasswordRequest,
    ) -> Result<ApiResponse<()>, ServiceError> {
        let tracing_ctx = self.observer.start(
            "reset_password",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("customer.email", req.email.clone()),
            ],
        );

        let result: Result<(), ServiceError> = async {
            match self.deps.otp.find_otp(&req.email).await? {
                Some(stored) if stored == req.otp => {}
                Some(_) => {
                    let attempts = self
                        .deps
                        .otp
                        .record_failure(&req.email, (OTP_TTL_MINUTES * 60) as u64)
                        .await?;
                    if attempts >= MAX_OTP_ATTEMPTS {
                        self.deps.otp.delete_otp(&req.email).await?;
                        warn!("🚫 Reset OTP for {} burned after {attempts} wrong guesses", req.email);
                        return Err(ServiceError::validation(
                            "Too many incorrect attempts, request a new OTP",
                        ));
                    }
                    return Err(ServiceError::validation("OTP is incorrect"));
                }
                None => return Err(ServiceError::validation("OTP has expired")),
            }

            let customer = self.live_customer(&req.email).await?;
            let hashed = self.deps.hashing.hash_password(&req.password).await?;

            self.deps
                .customers
                .update_password(customer.customer_id, &hashed)
                .await?;
            self.deps.otp.delete_otp(&req.email).await?;

            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                info!("🔑 Password reset for {}", req.email);
                self.observer
                    .success(&tracing_ctx, Method::Post, "Password reset");
                Ok(ApiResponse::success("Password has been reset", ()))
            }
            Err(err) => {
                warn!("⚠️ Password reset failed for {}: {err}", req.email);
                self.observer
                    .failure(&tracing_ctx, Method::Post, &err.to_string());
                Err(err)
            }
        }
    }
}
