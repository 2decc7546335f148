/**
 * User Search Handler
 *
 * GET /api/auth/users?username=<name> looks a user up by exact username,
 * typically to find someone to add to a project. Without the parameter every
 * user is listed, ordered by username.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserSearchQuery;
use crate::backend::auth::users::{list_users, UserProfile};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

pub async fn search_users(
    State(pool): State<SqlitePool>,
    AuthUser(_user): AuthUser,
    Query(query): Query<UserSearchQuery>,
) -> Result<Json<Vec<UserProfile>>, BackendError> {
    let username = query.username.as_deref().filter(|name| !name.is_empty());
    let users = list_users(&pool, username).await?;

    tracing::debug!("User search for {:?} returned {} users", username, users.len());
    Ok(Json(users))
}
