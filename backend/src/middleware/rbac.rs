//! Role-based access control extractors.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::models::user::UserRole;
use crate::AppState;

/// Extractor that requires a therapist account.
#[derive(Debug, Clone)]
pub struct RequireTherapist(pub CurrentUser);

impl FromRequestParts<AppState> for RequireTherapist {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Therapist {
            return Err(AppError::Forbidden("Therapist access required".to_string()));
        }
        Ok(RequireTherapist(user))
    }
}

/// Extractor that requires a patient account.
#[derive(Debug, Clone)]
pub struct RequirePatient(pub CurrentUser);

impl FromRequestParts<AppState> for RequirePatient {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Patient {
            return Err(AppError::Forbidden("Patient access required".to_string()));
        }
        Ok(RequirePatient(user))
    }
}
