//! Workout session recording and history.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::session::{RecordSession, Session};
use crate::services::protocol;

/// Store a finished workout for `patient_id`.
pub async fn record(
    pool: &PgPool,
    patient_id: Uuid,
    input: &RecordSession,
) -> Result<Session, AppError> {
    input.validate()?;

    if let Some(protocol_id) = input.protocol_id {
        protocol::find_by_id(pool, protocol_id).await?;
    }

    let session = sqlx::query_as::<_, Session>(
        r#"
        INSERT INTO sessions (patient_id, protocol_id, completed, quality_score, performed_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(patient_id)
    .bind(input.protocol_id)
    .bind(input.completed)
    .bind(input.quality_score)
    .bind(input.performed_at.unwrap_or_else(Utc::now))
    .fetch_one(pool)
    .await?;

    tracing::debug!(session_id = %session.id, %patient_id, "Recorded session");
    Ok(session)
}

/// A patient's own sessions, most recent first.
pub async fn list_for_patient(
    pool: &PgPool,
    patient_id: Uuid,
    pagination: &Pagination,
) -> Result<PagedResult<Session>, AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE patient_id = $1")
        .bind(patient_id)
        .fetch_one(pool)
        .await?;

    let items = sqlx::query_as::<_, Session>(
        r#"
        SELECT * FROM sessions
        WHERE patient_id = $1
        ORDER BY performed_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(patient_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}
