//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available to school staff accounts.
///
/// Roles are ordered by privilege level: Admin > Accountant > Teacher > Staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// School administrator — full tenant control.
    Admin,
    /// Manages fees, payment plans, and billing records.
    Accountant,
    /// Manages students and classes.
    Teacher,
    /// General staff with read-mostly access.
    Staff,
}

impl UserRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 4,
            Self::Accountant => 3,
            Self::Teacher => 2,
            Self::Staff => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Teacher => "teacher",
            Self::Staff => "staff",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = jeton_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "accountant" => Ok(Self::Accountant),
            "teacher" => Ok(Self::Teacher),
            "staff" => Ok(Self::Staff),
            _ => Err(jeton_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, accountant, teacher, staff"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Staff));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::Accountant.has_at_least(&UserRole::Teacher));
        assert!(!UserRole::Staff.has_at_least(&UserRole::Teacher));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("TEACHER".parse::<UserRole>().unwrap(), UserRole::Teacher);
        assert!("principal".parse::<UserRole>().is_err());
    }
}
