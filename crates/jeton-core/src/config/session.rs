//! Session and cookie configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session TTL in hours (absolute, from creation).
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Name of the HttpOnly session cookie.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Name of the script-readable CSRF cookie (double-submit pattern).
    #[serde(default = "default_csrf_cookie_name")]
    pub csrf_cookie_name: String,
    /// Whether cookies carry the `Secure` attribute. Disable only for
    /// plain-HTTP local development.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// SameSite policy for both cookies: `"strict"`, `"lax"`, or `"none"`.
    #[serde(default = "default_same_site")]
    pub cookie_same_site: String,
    /// Interval for the expired-session sweep in minutes.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            cookie_name: default_cookie_name(),
            csrf_cookie_name: default_csrf_cookie_name(),
            cookie_secure: true,
            cookie_same_site: default_same_site(),
            cleanup_interval_minutes: default_cleanup_interval(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_cookie_name() -> String {
    "jeton_session".to_string()
}

fn default_csrf_cookie_name() -> String {
    "csrfToken".to_string()
}

fn default_same_site() -> String {
    "strict".to_string()
}

fn default_cleanup_interval() -> u64 {
    15
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "jeton_session");
        assert_eq!(config.csrf_cookie_name, "csrfToken");
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, "strict");
        assert_eq!(config.ttl_hours, 24);
    }
}
