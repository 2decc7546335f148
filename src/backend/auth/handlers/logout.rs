/**
 * Logout Handler
 *
 * POST /api/auth/logout revokes the bearer token the request was made with.
 * Other tokens of the same user stay valid.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::DetailResponse;
use crate::backend::auth::sessions::revoke_token;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

pub async fn logout(
    State(pool): State<SqlitePool>,
    AuthUser(user): AuthUser,
) -> Result<Json<DetailResponse>, BackendError> {
    revoke_token(&pool, user.user_id, &user.token_id, user.expires_at).await?;

    tracing::info!("User logged out: {}", user.username);

    Ok(Json(DetailResponse {
        detail: "Successfully logged out.".to_string(),
    }))
}
