//! Session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use jeton_core::error::{AppError, ErrorKind};
use jeton_core::result::AppResult;
use jeton_entity::session::Session;

/// Repository for session rows.
///
/// Expiry is enforced at read time: every lookup filters on
/// `expires_at > NOW()`, so an expired row is indistinguishable from an
/// absent one even before the sweeper removes it.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a session row. Session ids are never reused, so this is a
    /// plain insert — a collision is a hard error, not an upsert.
    pub async fn create(&self, session: &Session) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sessions \
             (id, user_id, role, school_id, csrf_token, ip_address, user_agent, created_at, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&session.id)
        .bind(session.user_id)
        .bind(session.role)
        .bind(session.school_id)
        .bind(&session.csrf_token)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;
        Ok(())
    }

    /// Find an unexpired session by id.
    pub async fn find_valid(&self, id: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE id = $1 AND expires_at > NOW()",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Delete a session by id. Deleting an absent row is not an error.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete session", e)
            })?;
        Ok(())
    }

    /// Record client metadata on an existing session.
    pub async fn update_metadata(
        &self,
        id: &str,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET ip_address = $2, user_agent = $3 WHERE id = $1")
            .bind(id)
            .bind(ip_address)
            .bind(user_agent)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update session metadata", e)
            })?;
        Ok(())
    }

    /// Count unexpired sessions for a user.
    pub async fn count_active_by_user(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE user_id = $1 AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active sessions", e)
        })?;
        Ok(count)
    }

    /// Delete all expired rows, returning how many were removed.
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired sessions", e)
            })?;
        Ok(result.rows_affected())
    }
}
