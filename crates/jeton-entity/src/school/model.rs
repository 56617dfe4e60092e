//! School entity model.
//!
//! Only the fields the auth/onboarding core touches; the full school
//! record (address, branding, academic years) lives with the CRUD layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A school — the tenant boundary of the system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    /// Unique school identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// When the school was created.
    pub created_at: DateTime<Utc>,
}
