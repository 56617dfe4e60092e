//! `CurrentSession` extractor — the full session validator.
//!
//! Pulls the session cookie, validates the record against the store
//! (including expiry), and injects the identity snapshot into the handler.
//! Mandatory in every handler that touches tenant data; the edge gate's
//! cookie-presence check is not a substitute.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use jeton_core::error::AppError;
use jeton_entity::session::SessionIdentity;

use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated session identity available in handlers.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub SessionIdentity);

impl std::ops::Deref for CurrentSession {
    type Target = SessionIdentity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let session_id = cookies::extract(&jar, &state.config.session)
            .ok_or_else(|| AppError::unauthenticated("Missing session cookie"))?;

        let identity = state.session_manager.authenticate(&session_id).await?;

        Ok(CurrentSession(identity))
    }
}
