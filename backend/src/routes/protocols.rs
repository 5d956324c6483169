//! Protocol routes: listing for everyone signed in, authoring for therapists.

use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireTherapist;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::protocol::{CreateProtocol, Protocol, UpdateProtocol};
use crate::services::protocol as protocol_service;
use crate::AppState;

/// GET /api/protocols
pub async fn list(
    State(state): State<AppState>,
    current_user: CurrentUser,
    AppQuery(pagination): AppQuery<Pagination>,
) -> Result<Json<PagedResult<Protocol>>, AppError> {
    let result = protocol_service::list(&state.db, &current_user, &pagination).await?;
    Ok(Json(result))
}

/// GET /api/protocols/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<Protocol>, AppError> {
    let protocol = protocol_service::find_by_id(&state.db, id).await?;
    Ok(Json(protocol))
}

/// POST /api/protocols (therapist)
pub async fn create(
    State(state): State<AppState>,
    RequireTherapist(therapist): RequireTherapist,
    AppJson(body): AppJson<CreateProtocol>,
) -> Result<(StatusCode, Json<Protocol>), AppError> {
    let protocol = protocol_service::create(&state.db, therapist.id, &body).await?;
    Ok((StatusCode::CREATED, Json(protocol)))
}

/// PUT /api/protocols/{id} (authoring therapist)
pub async fn update(
    State(state): State<AppState>,
    RequireTherapist(therapist): RequireTherapist,
    AppPath(id): AppPath<Uuid>,
    AppJson(body): AppJson<UpdateProtocol>,
) -> Result<Json<Protocol>, AppError> {
    let protocol = protocol_service::update(&state.db, therapist.id, id, &body).await?;
    Ok(Json(protocol))
}

/// DELETE /api/protocols/{id} (authoring therapist)
pub async fn delete(
    State(state): State<AppState>,
    RequireTherapist(therapist): RequireTherapist,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    protocol_service::delete(&state.db, therapist.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
