use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

pub const SCOPE_CUSTOMER: &str = "customer";
pub const SCOPE_ADMIN: &str = "admin";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub scope: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(sub: i64, scope: String, exp: usize, iat: usize) -> Self {
        Claims {
            sub,
            scope,
            exp,
            iat,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

fn token_ttl(scope: &str) -> Option<Duration> {
    match scope {
        SCOPE_CUSTOMER => Some(Duration::days(7)),
        SCOPE_ADMIN => Some(Duration::hours(8)),
        _ => None,
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, subject_id: i64, scope: &str) -> Result<String, ServiceError> {
        let ttl = token_ttl(scope).ok_or(ServiceError::InvalidTokenType)?;
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + ttl).timestamp() as usize;

        let claims = Claims::new(subject_id, scope.to_string(), exp, iat);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_scope: &str) -> Result<i64, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(e),
            })?;

        if token_data.claims.scope != expected_scope {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims.sub)
    }

    fn expires_in(&self, scope: &str) -> i64 {
        token_ttl(scope).map(|ttl| ttl.num_seconds()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_subject() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(42, SCOPE_CUSTOMER).unwrap();

        assert_eq!(jwt.verify_token(&token, SCOPE_CUSTOMER).unwrap(), 42);
    }

    #[test]
    fn customer_token_is_not_an_admin_token() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token(7, SCOPE_CUSTOMER).unwrap();

        assert!(matches!(
            jwt.verify_token(&token, SCOPE_ADMIN),
            Err(ServiceError::InvalidTokenType)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtConfig::new("one").generate_token(1, SCOPE_ADMIN).unwrap();

        assert!(
            JwtConfig::new("two")
                .verify_token(&token, SCOPE_ADMIN)
                .is_err()
        );
    }

    #[test]
    fn unknown_scope_cannot_be_issued() {
        let jwt = JwtConfig::new("test-secret");
        assert!(matches!(
            jwt.generate_token(1, "root"),
            Err(ServiceError::InvalidTokenType)
        ));
    }
}
