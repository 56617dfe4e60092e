//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jeton_entity::onboarding::{StepName, StepStatus};
use jeton_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// User summary for responses. Never carries password material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email.
    pub email: String,
    /// Username.
    pub username: String,
    /// Role.
    pub role: String,
    /// School, once assigned.
    pub school_id: Option<Uuid>,
    /// Whether onboarding has been finalized.
    pub onboarding_completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last successful login.
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role.to_string(),
            school_id: user.school_id,
            onboarding_completed: user.onboarding_completed,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// Login/registration response. The session id itself travels only in the
/// Set-Cookie header; the body carries the expiry and the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// When the session expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: UserResponse,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Token pair response for the legacy token path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

/// One onboarding step in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResponse {
    /// Step name.
    pub step: StepName,
    /// Step status.
    pub status: StepStatus,
    /// When the step was last written.
    pub updated_at: DateTime<Utc>,
}
