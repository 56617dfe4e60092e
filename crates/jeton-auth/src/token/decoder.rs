//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use jeton_core::config::auth::AuthConfig;
use jeton_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens by signature and expiry.
#[derive(Clone)]
pub struct TokenDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock-skew tolerance

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::unauthenticated(
                "Invalid token type: expected access token",
            ));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::unauthenticated(
                "Invalid token type: expected refresh token",
            ));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encoder::TokenEncoder;
    use chrono::Utc;
    use jeton_core::config::auth::AuthConfig;
    use jeton_entity::user::{User, UserRole, UserStatus};
    use uuid::Uuid;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "head@greenfield.example".to_string(),
            username: "headteacher".to_string(),
            password_hash: String::new(),
            role: UserRole::Admin,
            school_id: Some(Uuid::new_v4()),
            onboarding_completed: true,
            onboarding_completed_at: Some(Utc::now()),
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-do-not-use".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_pair_round_trip() {
        let config = config();
        let encoder = TokenEncoder::new(&config);
        let decoder = TokenDecoder::new(&config);
        let user = test_user();

        let pair = encoder.generate_pair(&user).unwrap();

        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(access.sub, user.id);
        assert_eq!(access.school_id, user.school_id);

        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        let config = config();
        let encoder = TokenEncoder::new(&config);
        let decoder = TokenDecoder::new(&config);

        let pair = encoder.generate_pair(&test_user()).unwrap();
        assert!(decoder.decode_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let encoder = TokenEncoder::new(&config());
        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        let decoder = TokenDecoder::new(&other);

        let pair = encoder.generate_pair(&test_user()).unwrap();
        assert!(decoder.decode_access_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let config = config();
        let decoder = TokenDecoder::new(&config);
        let now = Utc::now().timestamp();

        let claims = Claims {
            sub: Uuid::new_v4(),
            role: UserRole::Admin,
            school_id: None,
            iat: now - 3600,
            exp: now - 600, // past the 5s leeway
            jti: Uuid::new_v4(),
            token_type: TokenType::Refresh,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(decoder.decode_refresh_token(&token).is_err());
    }
}
