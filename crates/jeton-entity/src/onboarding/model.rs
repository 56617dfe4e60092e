//! Onboarding step entity model and status report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::step::{StepName, StepStatus};

/// One row per `(user, step)` of the onboarding flow, idempotently
/// upsertable.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OnboardingStep {
    /// Row identifier.
    pub id: Uuid,
    /// The onboarding user.
    pub user_id: Uuid,
    /// Which step this row records.
    pub step_name: StepName,
    /// Whether the step is pending or completed.
    pub status: StepStatus,
    /// Step-specific payload (school name, plan choice, ...).
    pub data: serde_json::Value,
    /// When the row was first written.
    pub created_at: DateTime<Utc>,
    /// When the row was last upserted.
    pub updated_at: DateTime<Utc>,
}

/// Aggregated onboarding state for a user.
///
/// `completed` comes from the authoritative `users.onboarding_completed`
/// flag, not recomputed from step rows, so later step edits cannot flip a
/// finished user back to incomplete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingStatus {
    /// Whether onboarding has been finalized.
    pub completed: bool,
    /// Steps not yet completed, in flow order.
    pub missing_steps: Vec<StepName>,
    /// The next step the user should take, if any.
    pub current_step: Option<StepName>,
}
