//! CSRF double-submit middleware.
//!
//! Mutating API requests must echo the CSRF cookie in the `x-csrf-token`
//! header. The check only fires when a session cookie is present: without
//! one the handler rejects with 401 anyway, and the pre-session endpoints
//! (login, register, refresh) have no CSRF cookie to echo.

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use jeton_core::error::AppError;

use crate::cookies;
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the echoed CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Endpoints reachable before a session exists.
const EXEMPT_PATHS: [&str; 4] = [
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/token",
    "/api/auth/refresh",
];

/// Enforces the double-submit check on mutating requests.
pub async fn require_csrf(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method()) || EXEMPT_PATHS.contains(&request.uri().path()) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    if cookies::extract(&jar, &state.config.session).is_none() {
        return next.run(request).await;
    }

    let cookie_token = cookies::extract_csrf(&jar, &state.config.session);
    let header_token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match (cookie_token, header_token) {
        (Some(cookie), Some(header)) if cookie == header => next.run(request).await,
        _ => ApiError(AppError::forbidden("CSRF token missing or mismatched")).into_response(),
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutating_methods() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::HEAD));
    }

    #[test]
    fn test_exempt_paths_are_pre_session_endpoints() {
        for path in EXEMPT_PATHS {
            assert!(path.starts_with("/api/auth/"));
        }
    }
}
