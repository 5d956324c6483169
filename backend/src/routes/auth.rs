//! Authentication routes: per-role registration and login, current profile.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::errors::{AppError, MessageBody};
use crate::middleware::auth::CurrentUser;
use crate::models::user::{Credentials, UserResponse, UserRole};
use crate::services::auth::{self as auth_service, LoginResponse};
use crate::services::user as user_service;
use crate::AppState;

/// Read the credential form. A post without a JSON content type carries no fields,
/// so it falls through to the "Please enter all fields." validation.
fn credentials(
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Credentials, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Credentials::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

async fn register(
    state: &AppState,
    body: &Credentials,
    role: UserRole,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    auth_service::register(&state.db, body, role).await?;
    Ok((
        StatusCode::CREATED,
        MessageBody::new(format!("{} registered successfully.", role.label())),
    ))
}

/// POST /api/auth/therapist/register
pub async fn register_therapist(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    register(&state, &credentials(payload)?, UserRole::Therapist).await
}

/// POST /api/auth/patient/register
pub async fn register_patient(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageBody>), AppError> {
    register(&state, &credentials(payload)?, UserRole::Patient).await
}

/// POST /api/auth/therapist/login
pub async fn login_therapist(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let body = credentials(payload)?;
    let response =
        auth_service::login(&state.db, &body, UserRole::Therapist, &state.config.jwt_secret)
            .await?;
    Ok(Json(response))
}

/// POST /api/auth/patient/login
pub async fn login_patient(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let body = credentials(payload)?;
    let response =
        auth_service::login(&state.db, &body, UserRole::Patient, &state.config.jwt_secret)
            .await?;
    Ok(Json(response))
}

/// GET /api/auth/user: current user profile
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::find_by_id(&state.db, current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}
