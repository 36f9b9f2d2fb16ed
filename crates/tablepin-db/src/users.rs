//! Database operations for the `users` table.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub public_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upserts a user keyed on the case-insensitive email and returns the
/// stored row. An existing account keeps its row (and `created_at`); name
/// and role are overwritten with the incoming values.
///
/// Callers pass an already-trimmed email; comparison happens on the
/// lowercased value via the `users_email_lower_idx` unique index.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn upsert_user_by_email(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: &str,
) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "INSERT INTO users (name, email, role) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (LOWER(email)) \
         DO UPDATE SET name = EXCLUDED.name, role = EXCLUDED.role, updated_at = NOW() \
         RETURNING id, public_id, name, email, role, created_at, updated_at",
    )
    .bind(name)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Returns the user stored under `email` (case-insensitive), or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, public_id, name, email, role, created_at, updated_at \
         FROM users \
         WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
