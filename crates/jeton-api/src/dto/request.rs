//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use jeton_core::error::AppError;
use jeton_entity::onboarding::StepName;

/// Login request body. Either `email` or `username` identifies the account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email identifier.
    pub email: Option<String>,
    /// Username identifier.
    pub username: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    /// The identifier to look up, preferring email.
    pub fn identifier(&self) -> Result<&str, AppError> {
        self.email
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::validation("Either 'email' or 'username' is required"))
    }
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    /// Desired username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// Password; strength is checked separately against the password policy.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body. When absent, the refresh token is read from
/// its HttpOnly cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: Option<String>,
}

/// Onboarding step submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRequest {
    /// Which step is being submitted.
    pub step: StepName,
    /// Step-specific payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_identifier_prefers_email() {
        let req = LoginRequest {
            email: Some("admin@school.example".to_string()),
            username: Some("admin".to_string()),
            password: "pw".to_string(),
        };
        assert_eq!(req.identifier().unwrap(), "admin@school.example");
    }

    #[test]
    fn test_login_identifier_requires_one() {
        let req = LoginRequest {
            email: None,
            username: None,
            password: "pw".to_string(),
        };
        assert!(req.identifier().is_err());
    }
}
