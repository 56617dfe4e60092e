//! Token issuance and refresh rotation.

use std::sync::Arc;

use tracing::info;

use jeton_core::error::AppError;
use jeton_database::repositories::user::UserRepository;
use jeton_entity::user::User;

use super::decoder::TokenDecoder;
use super::encoder::{TokenEncoder, TokenPair};

/// Issues token pairs and performs refresh rotation.
#[derive(Debug, Clone)]
pub struct TokenService {
    /// Token encoder.
    encoder: Arc<TokenEncoder>,
    /// Token decoder.
    decoder: Arc<TokenDecoder>,
    /// User repository, consulted on refresh so role changes take effect.
    user_repo: Arc<UserRepository>,
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(
        encoder: Arc<TokenEncoder>,
        decoder: Arc<TokenDecoder>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            encoder,
            decoder,
            user_repo,
        }
    }

    /// Generates a fresh token pair for a verified user.
    pub fn generate(&self, user: &User) -> Result<TokenPair, AppError> {
        self.encoder.generate_pair(user)
    }

    /// Rotates a refresh token into a brand-new access + refresh pair.
    ///
    /// The old refresh token is superseded, not revoked — without a
    /// server-side denylist it stays verifiable until its expiry, which is
    /// the documented tradeoff of the stateless path.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthenticated("User no longer exists"))?;

        if !user.can_login() {
            return Err(AppError::forbidden("Account is deactivated"));
        }

        let pair = self.encoder.generate_pair(&user)?;
        info!(user_id = %user.id, "Token pair rotated");
        Ok(pair)
    }
}
