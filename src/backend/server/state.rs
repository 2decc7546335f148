/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * The state is immutable after startup: the connection pool (which is
 * internally shared) and the auth settings behind an `Arc`. There is no
 * other in-process shared mutable state.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query with &pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::server::config::AuthConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db: SqlitePool,

    /// Token and password settings
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(db: SqlitePool, auth: AuthConfig) -> Self {
        Self {
            db,
            auth: Arc::new(auth),
        }
    }
}

/// Lets handlers take `State<SqlitePool>` directly
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Lets handlers take `State<Arc<AuthConfig>>` directly
impl FromRef<AppState> for Arc<AuthConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}
