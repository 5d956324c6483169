//! Exercise protocols: a therapist's sets × reps prescription.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Protocol {
    pub id: Uuid,
    pub therapist_id: Uuid,
    pub name: String,
    pub exercise: Option<String>,
    pub description: Option<String>,
    pub sets: i32,
    pub reps: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upper bound for both `sets` and `reps`; mirrored by a CHECK in the protocols table.
pub const MAX_PRESCRIPTION: i32 = 1000;

/// Repetitions one full performance of a `sets` × `reps` prescription amounts to.
pub fn prescribed_reps(sets: i32, reps: i32) -> i64 {
    i64::from(sets).saturating_mul(i64::from(reps))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProtocol {
    #[validate(length(min = 1, message = "Protocol name is required."))]
    pub name: String,
    pub exercise: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 1000, message = "Sets must be between 0 and 1000."))]
    pub sets: i32,
    #[validate(range(min = 0, max = 1000, message = "Reps must be between 0 and 1000."))]
    pub reps: i32,
}

#[derive(Debug, Clone, Deserialize, Default, Validate)]
pub struct UpdateProtocol {
    #[validate(length(min = 1, message = "Protocol name is required."))]
    pub name: Option<String>,
    pub exercise: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0, max = 1000, message = "Sets must be between 0 and 1000."))]
    pub sets: Option<i32>,
    #[validate(range(min = 0, max = 1000, message = "Reps must be between 0 and 1000."))]
    pub reps: Option<i32>,
}
