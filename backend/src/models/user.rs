//! User accounts and the two clinical roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Therapist,
    Patient,
}

impl UserRole {
    /// Human-readable label used in registration and role-mismatch messages.
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Therapist => "Therapist",
            UserRole::Patient => "Patient",
        }
    }
}

/// Full user row from database (includes password_hash, never serialize to API).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// User response DTO: excludes password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// Email/password pair accepted by the register and login endpoints.
///
/// Fields default to empty so a missing key reports the same message as a blank one.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all fields."))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Please enter all fields."))]
    pub password: String,
}
