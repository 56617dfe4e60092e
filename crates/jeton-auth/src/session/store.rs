//! Session persistence wrapping the database repository.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tracing::warn;

use jeton_core::config::session::SessionConfig;
use jeton_core::error::AppError;
use jeton_database::repositories::session::SessionRepository;
use jeton_entity::session::Session;
use jeton_entity::user::User;

/// Identifiers handed back to the caller after session creation.
///
/// Deliberately does not implement `Display`/`Debug` exposure of the raw
/// id beyond what the cookie layer needs; neither value is ever logged.
#[derive(Clone)]
pub struct IssuedSession {
    /// The opaque session id destined for the HttpOnly cookie.
    pub session_id: String,
    /// The CSRF token destined for the script-readable cookie.
    pub csrf_token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedSession")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Abstracts session persistence operations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Session database repository.
    repo: Arc<SessionRepository>,
    /// Session configuration.
    config: SessionConfig,
}

impl SessionStore {
    /// Creates a new session store.
    pub fn new(repo: Arc<SessionRepository>, config: SessionConfig) -> Self {
        Self { repo, config }
    }

    /// Creates a new session record for the given user.
    ///
    /// Generates a fresh 256-bit session id and CSRF token, snapshots the
    /// user's identity, and inserts the row atomically. Concurrent creates
    /// for the same user are independent — one user may hold any number of
    /// sessions.
    pub async fn create(&self, user: &User) -> Result<IssuedSession, AppError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.ttl_hours as i64);

        let session = Session {
            id: generate_token(),
            user_id: user.id,
            role: user.role,
            school_id: user.school_id,
            csrf_token: generate_token(),
            ip_address: None,
            user_agent: None,
            created_at: now,
            expires_at,
        };

        self.repo.create(&session).await?;

        Ok(IssuedSession {
            session_id: session.id,
            csrf_token: session.csrf_token,
            expires_at,
        })
    }

    /// Looks up a session by id.
    ///
    /// Missing and expired sessions are both reported as `NotFound`;
    /// expiry is enforced at read time regardless of whether the sweeper
    /// has removed the row yet.
    pub async fn get(&self, session_id: &str) -> Result<Session, AppError> {
        self.repo
            .find_valid(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Session not found"))
    }

    /// Destroys a session. Destroying an absent session is a no-op.
    pub async fn destroy(&self, session_id: &str) -> Result<(), AppError> {
        self.repo.delete(session_id).await
    }

    /// Records client metadata on a session, best-effort.
    ///
    /// A failure here is logged and swallowed — audit metadata must never
    /// fail the request that carried it.
    pub async fn touch_metadata(
        &self,
        session_id: &str,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) {
        if let Err(e) = self
            .repo
            .update_metadata(session_id, ip_address, user_agent)
            .await
        {
            warn!(error = %e, "Failed to record session metadata");
        }
    }

    /// Deletes expired rows, returning how many were removed.
    pub async fn sweep_expired(&self) -> Result<u64, AppError> {
        self.repo.delete_expired().await
    }
}

/// Generates an opaque 256-bit token from the thread-local CSPRNG,
/// base64url-encoded without padding.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_tokens_are_unique_and_opaque() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        // 32 bytes -> 43 base64url chars, no padding.
        assert_eq!(a.len(), 43);
        assert!(!a.contains('='));
    }

    #[test]
    fn test_issued_session_debug_hides_tokens() {
        let issued = IssuedSession {
            session_id: "super-secret".to_string(),
            csrf_token: "also-secret".to_string(),
            expires_at: Utc::now(),
        };
        let rendered = format!("{issued:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
    }
}
