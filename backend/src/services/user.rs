//! Account lookups.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{User, UserRole};

/// Find a user by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// All patient accounts, ordered by email.
pub async fn list_patients(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let patients = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE role = $1 ORDER BY email ASC",
    )
    .bind(UserRole::Patient)
    .fetch_all(pool)
    .await?;
    Ok(patients)
}
