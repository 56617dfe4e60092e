//! Access grant repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jeton_core::error::{AppError, ErrorKind};
use jeton_core::result::AppResult;
use jeton_entity::subscription::{AccessGrant, GrantType};

/// Repository for trial/subscription grants.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the user's active, unexpired grant, if any.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Option<AccessGrant>> {
        sqlx::query_as::<_, AccessGrant>(
            "SELECT * FROM access_grants \
             WHERE user_id = $1 AND is_active AND end_date >= NOW()",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find active grant", e))
    }

    /// Replace the user's grant: deactivate any existing grants and insert
    /// the new one in a single transaction, preserving the at-most-one-
    /// active invariant under concurrent writers.
    pub async fn replace_grant(
        &self,
        user_id: Uuid,
        grant_type: GrantType,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> AppResult<AccessGrant> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("UPDATE access_grants SET is_active = FALSE WHERE user_id = $1 AND is_active")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to deactivate grants", e)
            })?;

        let grant = sqlx::query_as::<_, AccessGrant>(
            "INSERT INTO access_grants (id, user_id, grant_type, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(grant_type)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert grant", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit grant replacement", e)
        })?;

        Ok(grant)
    }
}
