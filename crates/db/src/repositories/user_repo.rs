//! Repository for the `users` table.

use sqlx::PgPool;
use taskup_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across user queries.
const COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, is_verified, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password, returning
    /// the row. The unique constraint on email rejects duplicates.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUser,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (first_name, last_name, email, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by their internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether a user with this ID exists.
    pub async fn exists_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Mark a user's email address as verified.
    ///
    /// Returns `true` if a row was updated.
    pub async fn mark_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_verified = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
