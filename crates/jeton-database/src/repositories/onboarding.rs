//! Onboarding step repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use jeton_core::error::{AppError, ErrorKind};
use jeton_core::result::AppResult;
use jeton_entity::onboarding::{OnboardingStep, StepName, StepStatus};

/// Repository for onboarding step rows.
#[derive(Debug, Clone)]
pub struct OnboardingRepository {
    pool: PgPool,
}

impl OnboardingRepository {
    /// Create a new onboarding repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently upsert a step for a user, keyed on `(user_id, step_name)`.
    pub async fn upsert_step(
        &self,
        user_id: Uuid,
        step_name: StepName,
        status: StepStatus,
        data: &serde_json::Value,
    ) -> AppResult<OnboardingStep> {
        sqlx::query_as::<_, OnboardingStep>(
            "INSERT INTO onboarding_steps (id, user_id, step_name, status, data) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, step_name) \
             DO UPDATE SET status = EXCLUDED.status, data = EXCLUDED.data, updated_at = NOW() \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(step_name)
        .bind(status)
        .bind(data)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert onboarding step", e)
        })
    }

    /// All step rows recorded for a user, in flow order.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<OnboardingStep>> {
        sqlx::query_as::<_, OnboardingStep>(
            "SELECT * FROM onboarding_steps WHERE user_id = $1 ORDER BY step_name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list onboarding steps", e)
        })
    }

    /// The step names a user has completed.
    pub async fn completed_steps(&self, user_id: Uuid) -> AppResult<Vec<StepName>> {
        sqlx::query_scalar::<_, StepName>(
            "SELECT step_name FROM onboarding_steps \
             WHERE user_id = $1 AND status = 'completed'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list completed steps", e)
        })
    }
}
