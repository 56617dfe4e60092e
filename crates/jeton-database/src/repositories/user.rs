//! User repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jeton_core::error::{AppError, ErrorKind};
use jeton_core::result::AppResult;
use jeton_entity::school::School;
use jeton_entity::user::model::CreateUser;
use jeton_entity::user::User;

/// Repository for user lookups and the narrow set of writes the auth and
/// onboarding core performs.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// Insert a new user. Duplicate email/username maps to `Conflict`.
    pub async fn create(&self, new_user: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, username, password_hash, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::conflict(
                        "A user with that email or username already exists",
                    );
                }
            }
            AppError::with_source(ErrorKind::Database, "Failed to create user", e)
        })
    }

    /// Update the last-login timestamp.
    pub async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last login", e)
            })?;
        Ok(())
    }

    /// Create a school and assign the user to it, atomically.
    ///
    /// Used by the school-setup onboarding step; both rows commit or
    /// neither does.
    pub async fn assign_school(&self, user_id: Uuid, school_name: &str) -> AppResult<School> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(school_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create school", e))?;

        sqlx::query("UPDATE users SET school_id = $2, updated_at = NOW() WHERE id = $1")
            .bind(user_id)
            .bind(school.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to assign school", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit school assignment", e)
        })?;

        Ok(school)
    }

    /// Mark onboarding complete, idempotently.
    ///
    /// The `WHERE NOT onboarding_completed` guard keeps the completion
    /// timestamp stable across repeated calls. Returns whether this call
    /// was the one that flipped the flag.
    pub async fn set_onboarding_completed(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET onboarding_completed = TRUE, \
             onboarding_completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND NOT onboarding_completed",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark onboarding complete", e)
        })?;

        Ok(result.rows_affected() > 0)
    }
}
