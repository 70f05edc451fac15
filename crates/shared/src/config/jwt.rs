use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

impl Claims {
    pub fn new(user_id: i64, exp: usize, iat: usize, token_type: String) -> Self {
        Claims {
            user_id,
            exp,
            iat,
            token_type,
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

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, user_id: i64, token_type: &str) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = match token_type {
            "access" => (now + Duration::minutes(60)).timestamp() as usize,
            "reset" => (now + Duration::minutes(15)).timestamp() as usize,
            _ => return Err(ServiceError::InvalidTokenType),
        };

        let claims = Claims::new(user_id, exp, iat, token_type.to_string());

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_type: &str) -> Result<i64, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(err),
            })?;

        if token_data.claims.token_type != expected_type {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::JwtServiceTrait;

    #[test]
    fn round_trips_access_token() {
        let jwt = JwtConfig::new("test-secret");

        let token = jwt.generate_token(42, "access").unwrap();
        let user_id = jwt.verify_token(&token, "access").unwrap();

        assert_eq!(user_id, 42);
    }

    #[test]
    fn rejects_wrong_token_type() {
        let jwt = JwtConfig::new("test-secret");

        let token = jwt.generate_token(42, "reset").unwrap();
        let err = jwt.verify_token(&token, "access").unwrap_err();

        assert!(matches!(err, ServiceError::InvalidTokenType));
    }

    #[test]
    fn rejects_unknown_token_type() {
        let jwt = JwtConfig::new("test-secret");

        let err = jwt.generate_token(42, "refresh").unwrap_err();

        assert!(matches!(err, ServiceError::InvalidTokenType));
    }

    #[test]
    fn rejects_tampered_token() {
        let jwt = JwtConfig::new("test-secret");
        let other = JwtConfig::new("other-secret");

        let token = jwt.generate_token(42, "access").unwrap();
        let err = other.verify_token(&token, "access").unwrap_err();

        assert!(matches!(err, ServiceError::Jwt(_)));
    }
}
