//! Auth handlers — register, login, logout, me, and the legacy token pair.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use jeton_core::error::AppError;
use jeton_entity::user::model::CreateUser;
use jeton_entity::user::UserRole;

use crate::cookies;
use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::state::AppState;

/// POST /api/auth/register
///
/// Creates a tenant admin account and logs it straight in; onboarding
/// starts from here.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    state.password_validator.validate(&req.password)?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&CreateUser {
            email: req.email,
            username: req.username,
            password_hash,
            role: UserRole::Admin,
        })
        .await?;

    let issued = state.session_manager.start_session(&user).await?;
    let jar = cookies::issue(jar, &issued, &state.config.session);

    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            expires_at: issued.expires_at,
            user: UserResponse::from(&user),
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let identifier = req.identifier()?;

    let ip_address = client_ip(&headers);
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok());

    let outcome = state
        .session_manager
        .login(identifier, &req.password, ip_address.as_deref(), user_agent)
        .await?;

    let jar = cookies::issue(jar, &outcome.issued, &state.config.session);

    Ok((
        jar,
        Json(ApiResponse::ok(SessionResponse {
            expires_at: outcome.issued.expires_at,
            user: UserResponse::from(&outcome.user),
        })),
    ))
}

/// POST /api/auth/logout
///
/// Always 200 with cleared cookies, even when no session existed or the
/// store is unavailable — a client must never be stranded with an
/// un-clearable cookie.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    if let Some(session_id) = cookies::extract(&jar, &state.config.session) {
        state.session_manager.logout(&session_id).await;
    }

    let jar = cookies::clear(jar, &state.config.session);

    (
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_repo
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| AppError::unauthenticated("User no longer exists"))?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// POST /api/auth/token — legacy token path.
///
/// Credential login that issues a stateless access + refresh pair instead
/// of a session. Kept for migration compatibility; the session path is
/// canonical.
pub async fn token_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let identifier = req.identifier()?;

    let user = state.verifier.verify(identifier, &req.password).await?;
    let pair = state.token_service.generate(&user)?;
    let jar = cookies::issue_token_cookies(jar, &pair, &state.config.session);

    Ok((
        jar,
        Json(ApiResponse::ok(TokenResponse {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        })),
    ))
}

/// POST /api/auth/refresh — legacy token path.
///
/// Rotates a refresh token (from the body, falling back to the HttpOnly
/// cookie) into a brand-new pair.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RefreshRequest>,
) -> Result<(CookieJar, Json<ApiResponse<TokenResponse>>), ApiError> {
    let refresh_token = req
        .refresh_token
        .or_else(|| {
            jar.get(cookies::REFRESH_TOKEN_COOKIE)
                .map(|c| c.value().to_string())
        })
        .ok_or_else(|| AppError::unauthenticated("Missing refresh token"))?;

    let pair = state.token_service.refresh(&refresh_token).await?;
    let jar = cookies::issue_token_cookies(jar, &pair, &state.config.session);

    Ok((
        jar,
        Json(ApiResponse::ok(TokenResponse {
            access_token: pair.access_token.clone(),
            refresh_token: pair.refresh_token.clone(),
            access_expires_at: pair.access_expires_at,
            refresh_expires_at: pair.refresh_expires_at,
        })),
    ))
}

/// Best-effort client IP from proxy headers.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers).as_deref(), Some("203.0.113.9"));
    }

    #[test]
    fn test_client_ip_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }
}
