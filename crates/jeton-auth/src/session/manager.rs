//! Session lifecycle manager — login, logout, and full validation flows.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use jeton_core::error::{AppError, ErrorKind};
use jeton_database::repositories::user::UserRepository;
use jeton_entity::session::SessionIdentity;
use jeton_entity::user::User;

use crate::credentials::CredentialVerifier;

use super::store::{IssuedSession, SessionStore};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The freshly issued session identifiers.
    pub issued: IssuedSession,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Credential verification.
    verifier: CredentialVerifier,
    /// Session persistence.
    store: Arc<SessionStore>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        verifier: CredentialVerifier,
        store: Arc<SessionStore>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            verifier,
            store,
            user_repo,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Verify credentials (generic failure on any mismatch)
    /// 2. Create the session row
    /// 3. Record client metadata and last-login, best-effort
    ///
    /// The metadata and last-login writes are fire-and-forget: their
    /// failure is logged and the login still succeeds.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<LoginOutcome, AppError> {
        let user = self.verifier.verify(identifier, password).await?;

        let issued = self.store.create(&user).await?;

        self.store
            .touch_metadata(&issued.session_id, ip_address, user_agent)
            .await;

        if let Err(e) = self.user_repo.update_last_login(user.id, Utc::now()).await {
            warn!(user_id = %user.id, error = %e, "Failed to update last login");
        }

        info!(user_id = %user.id, "Login successful");

        Ok(LoginOutcome { issued, user })
    }

    /// Creates a session for an already-verified user (used right after
    /// registration, where the password was just set).
    pub async fn start_session(&self, user: &User) -> Result<IssuedSession, AppError> {
        self.store.create(user).await
    }

    /// Performs the logout flow.
    ///
    /// Never fails the caller, so cookies can always be cleared even when
    /// the store is unavailable; a failed destroy is logged and the
    /// session lapses at its expiry.
    pub async fn logout(&self, session_id: &str) {
        match self.store.destroy(session_id).await {
            Ok(()) => info!("Logout completed"),
            Err(e) => warn!(error = %e, "Failed to destroy session on logout"),
        }
    }

    /// Fully validates a session id and returns the identity snapshot.
    ///
    /// This is the handler-layer check: it hits the store, enforces
    /// expiry, and produces the per-request identity. The edge gate's
    /// cookie-presence check is not a substitute for this.
    pub async fn authenticate(&self, session_id: &str) -> Result<SessionIdentity, AppError> {
        let session = match self.store.get(session_id).await {
            Ok(session) => session,
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(AppError::unauthenticated("Invalid or expired session"));
            }
            // Store unavailability is a server fault, not an auth failure.
            Err(e) => return Err(e),
        };

        Ok(session.identity())
    }
}
