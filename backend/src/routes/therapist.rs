use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::rbac::RequireTherapist;
use crate::models::user::UserResponse;
use crate::services::user as user_service;
use crate::AppState;

/// GET /api/therapist/patients: patient roster.
pub async fn patients(
    State(state): State<AppState>,
    RequireTherapist(_therapist): RequireTherapist,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let patients = user_service::list_patients(&state.db).await?;
    Ok(Json(patients.into_iter().map(UserResponse::from).collect()))
}
