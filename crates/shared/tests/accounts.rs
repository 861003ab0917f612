mod common;

use std::sync::Arc;

use common::{MemoryCustomers, MemoryOtp, RecordingMailer, registry};
use shared::{
    abstract_trait::{AuthServiceTrait, JwtServiceTrait, OtpStoreTrait},
    config::{Hashing, JwtConfig, SCOPE_ADMIN, SCOPE_CUSTOMER},
    domain::requests::{
        ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
    },
    errors::{RepositoryError, ServiceError},
    service::{AuthService, AuthServiceDeps, MAX_OTP_ATTEMPTS},
};

struct Accounts {
    service: AuthService,
    jwt: Arc<JwtConfig>,
    otp: Arc<MemoryOtp>,
    mailer: Arc<RecordingMailer>,
}

async fn accounts() -> Accounts {
    let jwt = Arc::new(JwtConfig::new("test-secret"));
    let otp = Arc::new(MemoryOtp::default());
    let mailer = Arc::new(RecordingMailer::default());

    let deps = AuthServiceDeps {
        customers: Arc::new(MemoryCustomers::default()),
        hashing: Arc::new(Hashing::with_cost(4)),
        jwt: jwt.clone(),
        otp: otp.clone(),
        email: mailer.clone(),
    };

    Accounts {
        service: AuthService::new(deps, registry()).await,
        jwt,
        otp,
        mailer,
    }
}

fn signup(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Nguyen Van A".into(),
        email: email.into(),
        password: password.into(),
        confirm_password: password.into(),
        phone: None,
        address: None,
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn register_then_login_issues_a_customer_token() {
    let accounts = accounts().await;

    let created = accounts
        .service
        .register(&signup("Khach@Example.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(created.data.email, "khach@example.com");

    let token = accounts
        .service
        .login(&login("khach@example.com", "secret123"))
        .await
        .unwrap()
        .data;

    assert_eq!(token.token_type, "Bearer");
    let subject = accounts
        .jwt
        .verify_token(&token.access_token, SCOPE_CUSTOMER)
        .unwrap();
    assert_eq!(subject, created.data.id as i64);
    assert!(accounts.jwt.verify_token(&token.access_token, SCOPE_ADMIN).is_err());
}

#[tokio::test]
async fn duplicate_email_is_refused() {
    let accounts = accounts().await;
    accounts
        .service
        .register(&signup("khach@example.com", "secret123"))
        .await
        .unwrap();

    let err = accounts
        .service
        .register(&signup("khach@example.com", "another1"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let accounts = accounts().await;
    accounts
        .service
        .register(&signup("khach@example.com", "secret123"))
        .await
        .unwrap();

    let wrong = accounts
        .service
        .login(&login("khach@example.com", "nope-nope"))
        .await
        .unwrap_err();
    let unknown = accounts
        .service
        .login(&login("ghost@example.com", "secret123"))
        .await
        .unwrap_err();

    assert!(matches!(wrong, ServiceError::InvalidCredentials));
    assert!(matches!(unknown, ServiceError::InvalidCredentials));
}

#[tokio::test]
async fn otp_resets_the_password_once() {
    let accounts = accounts().await;
    accounts
        .service
        .register(&signup("khach@example.com", "secret123"))
        .await
        .unwrap();

    accounts
        .service
        .forgot_password(&ForgotPasswordRequest {
            email: "khach@example.com".into(),
        })
        .await
        .unwrap();

    assert_eq!(accounts.mailer.sent().len(), 1);
    let otp = accounts
        .otp
        .find_otp("khach@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(otp.len(), 6);

    let reset = |code: &str| ResetPasswordRequest {
        email: "khach@example.com".into(),
        otp: code.into(),
        password: "brandnew1".into(),
        confirm_password: "brandnew1".into(),
    };

    let wrong_code = if otp == "000000" { "111111" } else { "000000" };
    let err = accounts.service.reset_password(&reset(wrong_code)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    accounts.service.reset_password(&reset(&otp)).await.unwrap();

    let err = accounts.service.reset_password(&reset(&otp)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    accounts
        .service
        .login(&login("khach@example.com", "brandnew1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn repeated_wrong_otps_burn_the_code() {
    let accounts = accounts().await;
    accounts
        .service
        .register(&signup("doan@example.com", "secret123"))
        .await
        .unwrap();
    accounts
        .service
        .forgot_password(&ForgotPasswordRequest {
            email: "doan@example.com".into(),
        })
        .await
        .unwrap();

    let otp = accounts
        .otp
        .find_otp("doan@example.com")
        .await
        .unwrap()
        .unwrap();
    let wrong_code = if otp == "000000" { "111111" } else { "000000" };
    let reset = |code: &str| ResetPasswordRequest {
        email: "doan@example.com".into(),
        otp: code.into(),
        password: "brandnew1".into(),
        confirm_password: "brandnew1".into(),
    };

    for _ in 0..MAX_OTP_ATTEMPTS {
        let err = accounts.service.reset_password(&reset(wrong_code)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    assert!(accounts.otp.find_otp("doan@example.com").await.unwrap().is_none());

    // The genuine code no longer works once burned.
    let err = accounts.service.reset_password(&reset(&otp)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    accounts
        .service
        .login(&login("doan@example.com", "secret123"))
        .await
        .unwrap();
}

#[tokio::test]
async fn a_fresh_otp_resets_the_attempt_count() {
    let accounts = accounts().await;
    accounts
        .service
        .register(&signup("moi@example.com", "secret123"))
        .await
        .unwrap();
    let forgot = ForgotPasswordRequest {
        email: "moi@example.com".into(),
    };
    accounts.service.forgot_password(&forgot).await.unwrap();

    let reset = |code: &str| ResetPasswordRequest {
        email: "moi@example.com".into(),
        otp: code.into(),
        password: "brandnew1".into(),
        confirm_password: "brandnew1".into(),
    };

    let first = accounts.otp.find_otp("moi@example.com").await.unwrap().unwrap();
    let wrong_code = if first == "000000" { "111111" } else { "000000" };
    for _ in 1..MAX_OTP_ATTEMPTS {
        accounts.service.reset_password(&reset(wrong_code)).await.unwrap_err();
    }

    accounts.service.forgot_password(&forgot).await.unwrap();
    let second = accounts.otp.find_otp("moi@example.com").await.unwrap().unwrap();
    let wrong_code = if second == "000000" { "111111" } else { "000000" };
    accounts.service.reset_password(&reset(wrong_code)).await.unwrap_err();

    accounts.service.reset_password(&reset(&second)).await.unwrap();
}

#[tokio::test]
async fn forgot_password_for_unknown_email_sends_nothing() {
    let accounts = accounts().await;

    let err = accounts
        .service
        .forgot_password(&ForgotPasswordRequest {
            email: "ghost@example.com".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(accounts.mailer.sent().is_empty());
}
