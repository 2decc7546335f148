/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * 1. Public routes: `/health`, register, login
 * 2. API routes behind the auth middleware (`route_layer`, so unknown paths
 *    still fall through to the 404 fallback instead of a 401)
 * 3. Fallback handler: JSON 404
 * 4. `TraceLayer` around everything
 */

use axum::routing::{get, post};
use axum::{middleware, response::Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::auth::{login, register};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn not_found() -> BackendError {
    BackendError::not_found("Resource")
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and auth settings
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected = configure_api_routes(Router::new())
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    public
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
