//! Edge access gate.
//!
//! The gate is a pure function over `(path, classification table,
//! has_session)` — the HTTP middleware in `jeton-api` only supplies the
//! cookie-presence bit and turns decisions into redirects. No database
//! call ever happens here; full authorization is the handler layer's job.

pub mod routes;

pub use routes::{EXCLUDED_PREFIXES, RouteClass, RoutePattern, default_route_table};

/// Where an unauthenticated or misplaced request should be sent.
pub const LOGIN_PATH: &str = "/login";
/// The default landing page for authenticated users.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Decision produced by the gate for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through to its handler.
    Allow,
    /// Send the client to the login page, preserving the original path.
    RedirectToLogin {
        /// The path the client was trying to reach.
        redirect: String,
    },
    /// Send an already-authenticated client to the landing page.
    RedirectToDashboard,
}

/// Evaluates the gate for a request path.
///
/// `has_session` is a cookie-presence bit only — the caller must not have
/// touched the session store to compute it. Classifications are checked in
/// table order; the first matching pattern wins, and unmatched paths are
/// allowed (full validation still happens in the handler).
pub fn evaluate(path: &str, has_session: bool, table: &[RoutePattern]) -> GateDecision {
    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path_matches(path, prefix))
    {
        return GateDecision::Allow;
    }

    let Some(class) = classify(path, table) else {
        return GateDecision::Allow;
    };

    match class {
        RouteClass::Public => GateDecision::Allow,
        RouteClass::AuthOnly => {
            if has_session {
                GateDecision::RedirectToDashboard
            } else {
                GateDecision::Allow
            }
        }
        RouteClass::Unlocked | RouteClass::Protected => {
            if has_session {
                GateDecision::Allow
            } else {
                GateDecision::RedirectToLogin {
                    redirect: path.to_string(),
                }
            }
        }
    }
}

/// Finds the first matching classification for a path.
pub fn classify(path: &str, table: &[RoutePattern]) -> Option<RouteClass> {
    table
        .iter()
        .find(|entry| entry.matches(path))
        .map(|entry| entry.class)
}

/// Exact match, or prefix match where the path continues with `/`.
pub(crate) fn path_matches(path: &str, pattern: &str) -> bool {
    path == pattern
        || path
            .strip_prefix(pattern)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static [RoutePattern] {
        default_route_table()
    }

    #[test]
    fn test_public_path_without_cookie_allowed() {
        assert_eq!(evaluate("/", false, table()), GateDecision::Allow);
        assert_eq!(evaluate("/pricing", false, table()), GateDecision::Allow);
    }

    #[test]
    fn test_protected_path_without_cookie_redirects_to_login() {
        assert_eq!(
            evaluate("/dashboard", false, table()),
            GateDecision::RedirectToLogin {
                redirect: "/dashboard".to_string()
            }
        );
        assert_eq!(
            evaluate("/students/42/fees", false, table()),
            GateDecision::RedirectToLogin {
                redirect: "/students/42/fees".to_string()
            }
        );
    }

    #[test]
    fn test_auth_only_path_with_cookie_redirects_to_dashboard() {
        assert_eq!(
            evaluate("/login", true, table()),
            GateDecision::RedirectToDashboard
        );
        assert_eq!(evaluate("/login", false, table()), GateDecision::Allow);
    }

    #[test]
    fn test_unlocked_path_requires_cookie_only() {
        assert_eq!(
            evaluate("/onboarding/school-setup", true, table()),
            GateDecision::Allow
        );
        assert_eq!(
            evaluate("/onboarding/school-setup", false, table()),
            GateDecision::RedirectToLogin {
                redirect: "/onboarding/school-setup".to_string()
            }
        );
    }

    #[test]
    fn test_excluded_prefixes_pass_through() {
        assert_eq!(evaluate("/api/auth/me", false, table()), GateDecision::Allow);
        assert_eq!(evaluate("/assets/app.css", false, table()), GateDecision::Allow);
    }

    #[test]
    fn test_unmatched_path_is_allowed() {
        assert_eq!(evaluate("/no-such-page", false, table()), GateDecision::Allow);
    }

    #[test]
    fn test_prefix_match_requires_segment_boundary() {
        // "/paymentsomething" must not match the "/payment" prefix.
        assert!(!path_matches("/paymentsomething", "/payment"));
        assert!(path_matches("/payment/select", "/payment"));
        assert!(path_matches("/payment", "/payment"));
    }
}
