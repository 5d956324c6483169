//! Recorded workout sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub protocol_id: Option<Uuid>,
    pub completed: bool,
    pub quality_score: Option<f64>,
    pub performed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/sessions`, sent when the tracker finishes a workout.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordSession {
    pub protocol_id: Option<Uuid>,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[validate(range(min = 0.0, max = 100.0, message = "Quality score must be between 0 and 100."))]
    pub quality_score: Option<f64>,
    pub performed_at: Option<DateTime<Utc>>,
}

fn default_completed() -> bool {
    true
}
