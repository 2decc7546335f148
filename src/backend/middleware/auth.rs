/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the acting user to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::auth::sessions::{is_token_revoked, verify_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    /// `jti` of the presented token
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Pull the token out of `Authorization: Bearer <token>`
fn bearer_token(request: &Request) -> Result<&str, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| BackendError::unauthenticated("Authentication credentials were not provided."))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BackendError::unauthenticated("Invalid authorization header format."))
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies signature and expiry
/// 3. Rejects revoked tokens
/// 4. Checks that the user still exists
/// 5. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if any step fails
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(&request).inspect_err(|_| {
        tracing::warn!("Missing or malformed authorization header");
    })?;

    let claims = verify_token(&app_state.auth, token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated("Invalid or expired token.")
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthenticated("Invalid or expired token.")
    })?;

    if is_token_revoked(&app_state.db, &claims.jti).await? {
        tracing::warn!("Revoked token presented for user {}", user_id);
        return Err(BackendError::unauthenticated("Token has been revoked."));
    }

    if get_user_by_id(&app_state.db, user_id).await?.is_none() {
        tracing::warn!("User not found in database: {}", user_id);
        return Err(BackendError::unauthenticated("User not found."));
    }

    let expires_at = claims.expires_at();
    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        username: claims.username,
        token_id: claims.jti,
        expires_at,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for authenticated user
///
/// This can be used as a parameter in handlers to automatically extract
/// the authenticated user from request extensions.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<AuthenticatedUser>().cloned().ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::unauthenticated("Authentication credentials were not provided.")
        })?;

        Ok(AuthUser(user))
    }
}
