//! Session routes: patients record finished workouts and browse their history.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::middleware::extract::{AppJson, AppQuery};
use crate::middleware::rbac::RequirePatient;
use crate::models::pagination::{PagedResult, Pagination};
use crate::models::session::{RecordSession, Session};
use crate::services::session as session_service;
use crate::AppState;

/// POST /api/sessions
pub async fn record(
    State(state): State<AppState>,
    RequirePatient(patient): RequirePatient,
    AppJson(body): AppJson<RecordSession>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = session_service::record(&state.db, patient.id, &body).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/sessions
pub async fn list(
    State(state): State<AppState>,
    RequirePatient(patient): RequirePatient,
    AppQuery(pagination): AppQuery<Pagination>,
) -> Result<Json<PagedResult<Session>>, AppError> {
    let result = session_service::list_for_patient(&state.db, patient.id, &pagination).await?;
    Ok(Json(result))
}
