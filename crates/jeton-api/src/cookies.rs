//! Session and CSRF cookie management.
//!
//! Two cookies per session: the HttpOnly `jeton_session` cookie carrying
//! the opaque session id, and the script-readable CSRF cookie for the
//! double-submit check. Clearing is idempotent and succeeds whether or not
//! a session cookie was ever present.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use jeton_auth::session::IssuedSession;
use jeton_auth::token::TokenPair;
use jeton_core::config::session::SessionConfig;

/// Cookie names used by the legacy token path.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Refresh token cookie name.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Sets both session cookies on the jar.
pub fn issue(jar: CookieJar, issued: &IssuedSession, config: &SessionConfig) -> CookieJar {
    let session_cookie = Cookie::build((config.cookie_name.clone(), issued.session_id.clone()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .path("/");

    // Readable by script: the client echoes this value back in the
    // x-csrf-token header on mutating requests.
    let csrf_cookie = Cookie::build((config.csrf_cookie_name.clone(), issued.csrf_token.clone()))
        .http_only(false)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .path("/");

    jar.add(session_cookie).add(csrf_cookie)
}

/// The configured SameSite policy; unknown values fall back to Strict.
fn same_site(config: &SessionConfig) -> SameSite {
    match config.cookie_same_site.as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}

/// Expires both session cookies (Max-Age=0). Idempotent.
pub fn clear(jar: CookieJar, config: &SessionConfig) -> CookieJar {
    jar.remove(Cookie::build((config.cookie_name.clone(), "")).path("/"))
        .remove(Cookie::build((config.csrf_cookie_name.clone(), "")).path("/"))
}

/// Reads the session id from the jar. Never fails.
pub fn extract(jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Reads the CSRF cookie value from the jar.
pub fn extract_csrf(jar: &CookieJar, config: &SessionConfig) -> Option<String> {
    jar.get(&config.csrf_cookie_name)
        .map(|cookie| cookie.value().to_string())
}

/// Sets the HttpOnly token-pair cookies used by the legacy token path.
pub fn issue_token_cookies(jar: CookieJar, pair: &TokenPair, config: &SessionConfig) -> CookieJar {
    let access = Cookie::build((ACCESS_TOKEN_COOKIE, pair.access_token.clone()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .path("/");
    let refresh = Cookie::build((REFRESH_TOKEN_COOKIE, pair.refresh_token.clone()))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(same_site(config))
        .path("/");
    jar.add(access).add(refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config() -> SessionConfig {
        SessionConfig::default()
    }

    fn issued() -> IssuedSession {
        IssuedSession {
            session_id: "sid-value".to_string(),
            csrf_token: "csrf-value".to_string(),
            expires_at: Utc::now(),
        }
    }

    #[test]
    fn test_issue_sets_both_cookies() {
        let jar = issue(CookieJar::new(), &issued(), &config());

        let session = jar.get("jeton_session").expect("session cookie");
        assert_eq!(session.value(), "sid-value");
        assert_eq!(session.http_only(), Some(true));
        assert_eq!(session.same_site(), Some(SameSite::Strict));

        let csrf = jar.get("csrfToken").expect("csrf cookie");
        assert_eq!(csrf.value(), "csrf-value");
        // The double-submit cookie must stay readable by script.
        assert_ne!(csrf.http_only(), Some(true));
    }

    #[test]
    fn test_extract_round_trip() {
        let config = config();
        let jar = issue(CookieJar::new(), &issued(), &config);
        assert_eq!(extract(&jar, &config).as_deref(), Some("sid-value"));
        assert_eq!(extract_csrf(&jar, &config).as_deref(), Some("csrf-value"));
    }

    #[test]
    fn test_extract_on_empty_jar_is_none() {
        assert_eq!(extract(&CookieJar::new(), &config()), None);
    }

    #[test]
    fn test_clear_without_session_succeeds() {
        // Clearing an empty jar must not panic and must leave no readable value.
        let jar = clear(CookieJar::new(), &config());
        assert!(extract(&jar, &config()).map_or(true, |v| v.is_empty()));
    }
}
