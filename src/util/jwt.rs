use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::JwtConfig;

pub const ADMIN_ROLE: &str = "admin";
pub const ADMIN_SUBJECT: &str = "kiosk-admin";

/// Claims carried by a dashboard token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (always the kiosk admin)
    pub sub: String,
    pub role: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

/// Returned by a successful PIN unlock
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminToken {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Failed to encode JWT token: {0}")]
    EncodingFailed(String),
    #[error("Failed to decode JWT token: {0}")]
    DecodingFailed(String),
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token format")]
    InvalidToken,
    #[error("Insufficient role: {0}")]
    InsufficientRole(String),
}

pub trait JwtTokenUtils {
    fn generate_admin_token(&self) -> Result<AdminToken, JwtError>;
    fn validate_admin_token(&self, token: &str) -> Result<Claims, JwtError>;
    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError>;
}

#[derive(Debug, Clone)]
pub struct JwtTokenUtilsImpl {
    pub jwt_config: JwtConfig,
}

impl JwtTokenUtilsImpl {
    pub fn new(jwt_config: JwtConfig) -> Self {
        JwtTokenUtilsImpl { jwt_config }
    }

    fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        debug!("Validating JWT token");

        let decoding_key = DecodingKey::from_secret(self.jwt_config.jwt_secret.as_ref());
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(ref issuer) = self.jwt_config.jwt_issuer {
            validation.set_issuer(&[issuer]);
        }

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    warn!("Admin token has expired");
                    Err(JwtError::TokenExpired)
                }
                _ => {
                    error!("Failed to decode JWT token: {}", err);
                    Err(JwtError::DecodingFailed(err.to_string()))
                }
            },
        }
    }
}

impl JwtTokenUtils for JwtTokenUtilsImpl {
    fn generate_admin_token(&self) -> Result<AdminToken, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.jwt_config.access_token_expiration);

        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            iss: self.jwt_config.jwt_issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let encoding_key = EncodingKey::from_secret(self.jwt_config.jwt_secret.as_ref());
        let token = encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|err| {
            error!("Failed to encode JWT token: {}", err);
            JwtError::EncodingFailed(err.to_string())
        })?;

        info!("Issued admin token {}", claims.jti);
        Ok(AdminToken {
            access_token: token,
            expires_in: self.jwt_config.access_token_expiration * 60,
            token_type: "Bearer".to_string(),
        })
    }

    fn validate_admin_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.role != ADMIN_ROLE {
            warn!("Token {} carries role {}", claims.jti, claims.role);
            return Err(JwtError::InsufficientRole(claims.role));
        }
        Ok(claims)
    }

    fn extract_token_from_header(&self, auth_header: &str) -> Result<String, JwtError> {
        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            debug!("Invalid authorization header format");
            JwtError::InvalidToken
        })?;
        let token = token.trim();
        if token.is_empty() {
            return Err(JwtError::InvalidToken);
        }
        Ok(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utils() -> JwtTokenUtilsImpl {
        JwtTokenUtilsImpl::new(JwtConfig::default())
    }

    #[test]
    fn test_admin_token_round_trip() {
        let utils = utils();
        let token = utils.generate_admin_token().unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 30 * 60);
        let claims = utils.validate_admin_token(&token.access_token).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = JwtTokenUtilsImpl::new(JwtConfig {
            jwt_secret: "another_secret_that_is_long_enough_1234".to_string(),
            ..JwtConfig::default()
        });
        let token = other.generate_admin_token().unwrap();
        assert!(utils().validate_admin_token(&token.access_token).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        let utils = utils();
        assert_eq!(utils.extract_token_from_header("Bearer abc").unwrap(), "abc");
        assert!(utils.extract_token_from_header("Basic abc").is_err());
        assert!(utils.extract_token_from_header("Bearer   ").is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            utils().validate_admin_token("not.a.token"),
            Err(JwtError::DecodingFailed(_))
        ));
    }
}
