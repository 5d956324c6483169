//! Authentication service: password hashing, JWT, registration and role-specific login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidateEmail};

use crate::errors::AppError;
use crate::models::user::{Credentials, User, UserRole};

/// Tokens are valid for a fixed window from issuance; there is no refresh path.
pub const TOKEN_LIFETIME_HOURS: i64 = 5;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

/// Public part of the account returned next to a fresh token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Body returned on successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Sign a token for `user` valid from now.
pub fn issue_token(user: &User, jwt_secret: &str) -> Result<String, AppError> {
    issue_token_at(user.id, user.role, jwt_secret, Utc::now())
}

/// Sign a token as if it had been issued at `issued_at`.
pub fn issue_token_at(
    user_id: Uuid,
    role: UserRole,
    jwt_secret: &str,
    issued_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: (issued_at + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp(),
        iat: issued_at.timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Validate a JWT and return the claims.
///
/// Forged, malformed and expired tokens all collapse into `Unauthorized`.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Create an account with the given role.
pub async fn register(
    pool: &PgPool,
    input: &Credentials,
    role: UserRole,
) -> Result<User, AppError> {
    input.validate()?;
    if !input.email.validate_email() {
        return Err(AppError::Validation("Please enter a valid email.".to_string()));
    }

    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&input.email)
    .bind(&password_hash)
    .bind(role)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("User already exists.".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, role = ?role, "Registered account");
    Ok(user)
}

/// Authenticate against the login endpoint dedicated to `expected_role`.
pub async fn login(
    pool: &PgPool,
    input: &Credentials,
    expected_role: UserRole,
    jwt_secret: &str,
) -> Result<LoginResponse, AppError> {
    input.validate()?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&input.email)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // Role is checked before the password, so a wrong-portal login is reported as such.
    if user.role != expected_role {
        tracing::warn!(user_id = %user.id, "Login attempted through the wrong role portal");
        return Err(AppError::Forbidden(format!(
            "Not a {} account.",
            expected_role.label().to_lowercase()
        )));
    }

    if !verify_password(&input.password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(&user, jwt_secret)?;
    Ok(LoginResponse {
        token,
        user: SessionUser {
            id: user.id,
            email: user.email,
            role: user.role,
        },
    })
}
