//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

/// A server-side session record identifying an authenticated browser.
///
/// Created on login, destroyed on logout. The `id` is the opaque cookie
/// value: 256 bits from a CSPRNG, never reused, and treated as a secret —
/// it must never appear in logs.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque session identifier (primary lookup key).
    pub id: String,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Role snapshot captured at session creation.
    pub role: UserRole,
    /// School snapshot captured at session creation.
    pub school_id: Option<Uuid>,
    /// CSRF token bound 1:1 to this session (double-submit pattern).
    pub csrf_token: String,
    /// IP address from which the session was created (best-effort).
    pub ip_address: Option<String>,
    /// User-Agent header value (best-effort).
    pub user_agent: Option<String>,
    /// When the session was created (login time).
    pub created_at: DateTime<Utc>,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check whether the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Extract the identity snapshot carried by this session.
    pub fn identity(&self) -> SessionIdentity {
        SessionIdentity {
            user_id: self.user_id,
            role: self.role,
            school_id: self.school_id,
            session_id: self.id.clone(),
            csrf_token: self.csrf_token.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// The authenticated identity attached to a request after full session
/// validation. Threaded explicitly through handlers — no global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// The authenticated user.
    pub user_id: Uuid,
    /// Role snapshot.
    pub role: UserRole,
    /// School snapshot.
    pub school_id: Option<Uuid>,
    /// The validated session id.
    #[serde(skip_serializing)]
    pub session_id: String,
    /// The session's CSRF token.
    #[serde(skip_serializing)]
    pub csrf_token: String,
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(expires_at: DateTime<Utc>) -> Session {
        Session {
            id: "opaque".to_string(),
            user_id: Uuid::new_v4(),
            role: UserRole::Admin,
            school_id: None,
            csrf_token: "csrf".to_string(),
            ip_address: None,
            user_agent: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_expiry() {
        assert!(session(Utc::now() - Duration::seconds(1)).is_expired());
        assert!(!session(Utc::now() + Duration::hours(1)).is_expired());
    }
}
