/**
 * Current User Handler
 *
 * GET /api/auth/user returns the profile of the authenticated user. The
 * token itself has already been checked by the auth middleware.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::{get_user_by_id, UserProfile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing or invalid token (from the middleware)
/// * `404 Not Found` - The user was deleted after the token was checked
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let user = get_user_by_id(&pool, user.user_id).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", user.user_id);
        BackendError::not_found("User")
    })?;

    Ok(Json(user.into()))
}
