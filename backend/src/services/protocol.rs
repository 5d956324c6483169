//! Protocol CRUD. Only the authoring therapist may change or remove a protocol.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::protocol::{CreateProtocol, Protocol, UpdateProtocol};
use crate::models::user::UserRole;

/// List protocols visible to `viewer`: therapists see their own, patients see all.
pub async fn list(
    pool: &PgPool,
    viewer: &CurrentUser,
    pagination: &Pagination,
) -> Result<PagedResult<Protocol>, AppError> {
    let author = match viewer.role {
        UserRole::Therapist => Some(viewer.id),
        UserRole::Patient => None,
    };

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM protocols WHERE ($1::uuid IS NULL OR therapist_id = $1)",
    )
    .bind(author)
    .fetch_one(pool)
    .await?;

    let items = sqlx::query_as::<_, Protocol>(
        r#"
        SELECT * FROM protocols
        WHERE ($1::uuid IS NULL OR therapist_id = $1)
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(author)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(pool)
    .await?;

    Ok(PagedResult::new(items, total, pagination))
}

/// Find a protocol by ID.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Protocol, AppError> {
    sqlx::query_as::<_, Protocol>("SELECT * FROM protocols WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Protocol not found".to_string()))
}

pub async fn create(
    pool: &PgPool,
    therapist_id: Uuid,
    input: &CreateProtocol,
) -> Result<Protocol, AppError> {
    input.validate()?;

    let protocol = sqlx::query_as::<_, Protocol>(
        r#"
        INSERT INTO protocols (therapist_id, name, exercise, description, sets, reps)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(therapist_id)
    .bind(&input.name)
    .bind(&input.exercise)
    .bind(&input.description)
    .bind(input.sets)
    .bind(input.reps)
    .fetch_one(pool)
    .await?;

    tracing::info!(protocol_id = %protocol.id, %therapist_id, "Created protocol");
    Ok(protocol)
}

pub async fn update(
    pool: &PgPool,
    therapist_id: Uuid,
    id: Uuid,
    input: &UpdateProtocol,
) -> Result<Protocol, AppError> {
    input.validate()?;
    let existing = find_owned(pool, therapist_id, id).await?;

    let protocol = sqlx::query_as::<_, Protocol>(
        r#"
        UPDATE protocols SET
            name = COALESCE($2, name),
            exercise = COALESCE($3, exercise),
            description = COALESCE($4, description),
            sets = COALESCE($5, sets),
            reps = COALESCE($6, reps),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(existing.id)
    .bind(&input.name)
    .bind(&input.exercise)
    .bind(&input.description)
    .bind(input.sets)
    .bind(input.reps)
    .fetch_one(pool)
    .await?;

    Ok(protocol)
}

/// Delete a protocol. Sessions that performed it keep existing with no protocol.
pub async fn delete(pool: &PgPool, therapist_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let existing = find_owned(pool, therapist_id, id).await?;

    sqlx::query("DELETE FROM protocols WHERE id = $1")
        .bind(existing.id)
        .execute(pool)
        .await?;

    tracing::info!(protocol_id = %id, %therapist_id, "Deleted protocol");
    Ok(())
}

async fn find_owned(pool: &PgPool, therapist_id: Uuid, id: Uuid) -> Result<Protocol, AppError> {
    let protocol = find_by_id(pool, id).await?;
    if protocol.therapist_id != therapist_id {
        return Err(AppError::Forbidden(
            "You can only modify your own protocols.".to_string(),
        ));
    }
    Ok(protocol)
}
