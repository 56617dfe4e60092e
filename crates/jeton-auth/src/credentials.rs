//! Credential verification — identifier + password against stored hashes.

use std::sync::Arc;

use tracing::debug;

use jeton_core::error::AppError;
use jeton_database::repositories::user::UserRepository;
use jeton_entity::user::User;

use crate::password::PasswordHasher;

/// Verifies login credentials without any side effects beyond the lookup.
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
}

impl CredentialVerifier {
    /// Creates a new credential verifier.
    pub fn new(user_repo: Arc<UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self { user_repo, hasher }
    }

    /// Verifies an identifier (email or username) and password.
    ///
    /// The identifier is matched against email first (case-insensitive),
    /// then username. An unknown identifier and a wrong password both fail
    /// with the same generic [`InvalidCredentials`] error so the caller
    /// cannot probe which accounts exist.
    ///
    /// [`InvalidCredentials`]: jeton_core::error::ErrorKind::InvalidCredentials
    pub async fn verify(&self, identifier: &str, password: &str) -> Result<User, AppError> {
        let user = match self.user_repo.find_by_email(identifier).await? {
            Some(user) => Some(user),
            None => self.user_repo.find_by_username(identifier).await?,
        };

        let Some(user) = user else {
            debug!("Login attempt for unknown identifier");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(AppError::invalid_credentials());
        }

        if !user.can_login() {
            return Err(AppError::forbidden(
                "Account is deactivated. Contact an administrator.",
            ));
        }

        Ok(user)
    }
}
