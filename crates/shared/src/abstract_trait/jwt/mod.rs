use std::sync::Arc;

use crate::errors::ServiceError;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

/// Issues and checks access tokens. `scope` separates customer tokens from
/// back-office tokens so one can never pass for the other.
pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, subject_id: i64, scope: &str) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str, expected_scope: &str) -> Result<i64, ServiceError>;
    fn expires_in(&self, scope: &str) -> i64;
}
