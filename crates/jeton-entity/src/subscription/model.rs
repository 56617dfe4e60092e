//! Access grant entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a grant is a free trial or a paid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "grant_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GrantType {
    /// Time-bounded free trial.
    Trial,
    /// Paid subscription.
    Paid,
}

impl GrantType {
    /// Return the grant type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-bounded access entitlement. At most one active grant exists per
/// user; inserting a new grant deactivates prior ones in the same
/// transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccessGrant {
    /// Row identifier.
    pub id: Uuid,
    /// The entitled user.
    pub user_id: Uuid,
    /// Trial or paid.
    pub grant_type: GrantType,
    /// When the entitlement starts.
    pub start_date: DateTime<Utc>,
    /// When the entitlement ends.
    pub end_date: DateTime<Utc>,
    /// Deactivated grants stay on record for audit.
    pub is_active: bool,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

impl AccessGrant {
    /// Access is live iff the grant is active and not past its end date.
    pub fn is_current(&self) -> bool {
        self.is_active && Utc::now() <= self.end_date
    }

    /// Whole days left on the grant, floored at zero.
    pub fn days_remaining(&self) -> i64 {
        (self.end_date - Utc::now()).num_days().max(0)
    }
}

/// The outcome of an access check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessStatus {
    /// Whether an active grant exists.
    pub has_access: bool,
    /// Grant type, when one exists.
    pub grant_type: Option<GrantType>,
    /// Whole days left, when a grant exists.
    pub days_remaining: Option<i64>,
}

impl AccessStatus {
    /// The status reported when no grant exists.
    pub fn none() -> Self {
        Self {
            has_access: false,
            grant_type: None,
            days_remaining: None,
        }
    }
}
