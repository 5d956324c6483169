//! Patient-facing progress routes.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::stats::{self, UserStats};
use crate::AppState;

/// GET /api/user/stats: workout totals and daily activity for the caller.
pub async fn stats(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<UserStats>, AppError> {
    let stats = stats::get_user_stats(&state.db, current_user.id).await?;
    Ok(Json(stats))
}
