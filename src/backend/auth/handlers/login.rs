/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown users and wrong passwords both return `400 {"error": "Invalid credentials"}`
 * - User passwords are never logged or returned in responses
 */

use std::sync::Arc;

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::config::AuthConfig;
use crate::shared::validation::{FieldErrors, REQUIRED};

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, unknown user or wrong password
/// * `500 Internal Server Error` - Database, hashing or token failure
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "username": "alice",
///     "email": "alice@example.com",
///     "first_name": "Alice",
///     "last_name": ""
///   }
/// }
/// ```
pub async fn login(
    State(pool): State<SqlitePool>,
    State(auth): State<Arc<AuthConfig>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let mut errors = FieldErrors::new();
    if request.username.is_none() {
        errors.add("username", REQUIRED);
    }
    if request.password.is_none() {
        errors.add("password", REQUIRED);
    }
    let (Some(username), Some(password)) = (request.username, request.password) else {
        return Err(BackendError::Validation(errors));
    };
    tracing::info!("Login request for: {}", username);

    let user = get_user_by_username(&pool, &username).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", username);
        BackendError::InvalidCredentials
    })?;

    if !verify_password(password, user.password_hash.clone()).await? {
        tracing::warn!("Invalid password for user: {}", username);
        return Err(BackendError::InvalidCredentials);
    }

    let token = create_token(&auth, user.id, &user.username).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal(format!("token signing failed: {e}"))
    })?;

    tracing::info!("User logged in successfully: {}", user.username);

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}
