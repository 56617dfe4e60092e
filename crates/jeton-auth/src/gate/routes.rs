//! Static route classification tables.
//!
//! Classification is data, not code: an ordered list of `(pattern, class)`
//! checked first-match-wins, in fixed priority order — public, auth-only,
//! authenticated-but-unlocked, protected.

/// Route categories the gate distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable with or without a session.
    Public,
    /// Login/registration pages: redirect away when already authenticated.
    AuthOnly,
    /// Session required, but no onboarding/subscription check — the pages
    /// a half-onboarded user must still reach.
    Unlocked,
    /// Session required; full validation happens in the handler layer.
    Protected,
}

/// One classification entry.
#[derive(Debug, Clone, Copy)]
pub struct RoutePattern {
    /// Path pattern: exact, prefix (matches when the path continues with
    /// `/`), or explicit wildcard when ending in `/*`.
    pub pattern: &'static str,
    /// The class assigned on match.
    pub class: RouteClass,
}

impl RoutePattern {
    /// Whether the given request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        if let Some(prefix) = self.pattern.strip_suffix("/*") {
            return path.starts_with(prefix);
        }
        super::path_matches(path, self.pattern)
    }
}

/// Infra prefixes the gate never inspects: static assets and the API
/// namespace, which authenticates its own requests.
pub const EXCLUDED_PREFIXES: [&str; 3] = ["/api", "/assets", "/favicon.ico"];

/// The route table for the page surface, in priority order.
const ROUTE_TABLE: [RoutePattern; 13] = [
    // Public marketing pages.
    RoutePattern { pattern: "/", class: RouteClass::Public },
    RoutePattern { pattern: "/about", class: RouteClass::Public },
    RoutePattern { pattern: "/pricing", class: RouteClass::Public },
    RoutePattern { pattern: "/contact", class: RouteClass::Public },
    // Pages that make no sense with a live session.
    RoutePattern { pattern: "/login", class: RouteClass::AuthOnly },
    RoutePattern { pattern: "/register", class: RouteClass::AuthOnly },
    RoutePattern { pattern: "/forgot-password", class: RouteClass::AuthOnly },
    // Reachable before onboarding/payment completes.
    RoutePattern { pattern: "/onboarding", class: RouteClass::Unlocked },
    RoutePattern { pattern: "/payment", class: RouteClass::Unlocked },
    // Tenant data behind full validation.
    RoutePattern { pattern: "/dashboard", class: RouteClass::Protected },
    RoutePattern { pattern: "/students", class: RouteClass::Protected },
    RoutePattern { pattern: "/staff", class: RouteClass::Protected },
    RoutePattern { pattern: "/fees", class: RouteClass::Protected },
];

/// The default route table.
pub fn default_route_table() -> &'static [RoutePattern] {
    &ROUTE_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_public_auth_unlocked_protected() {
        let mut last_rank = 0u8;
        for entry in default_route_table() {
            let rank = match entry.class {
                RouteClass::Public => 1,
                RouteClass::AuthOnly => 2,
                RouteClass::Unlocked => 3,
                RouteClass::Protected => 4,
            };
            assert!(rank >= last_rank, "table out of priority order");
            last_rank = rank;
        }
    }

    #[test]
    fn test_patterns_are_disjoint() {
        let table = default_route_table();
        for (i, a) in table.iter().enumerate() {
            for b in &table[i + 1..] {
                assert_ne!(a.pattern, b.pattern, "duplicate pattern");
            }
        }
    }

    #[test]
    fn test_wildcard_suffix() {
        let entry = RoutePattern {
            pattern: "/reports/*",
            class: RouteClass::Protected,
        };
        assert!(entry.matches("/reports/weekly"));
        assert!(entry.matches("/reports/"));
        assert!(!entry.matches("/report"));
    }

    #[test]
    fn test_root_pattern_is_exact_only() {
        // "/" must not classify every path as public.
        let root = RoutePattern {
            pattern: "/",
            class: RouteClass::Public,
        };
        assert!(root.matches("/"));
        assert!(!root.matches("/dashboard"));
    }
}
