/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * open the database, build the shared state, configure the router.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Load Database**: Opens the SQLite pool and runs migrations
/// 2. **Create App State**: Pool plus auth settings
/// 3. **Create Router**: Configures all routes and middleware
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing collabhub backend server");

    let db = load_database(&config.database).await?;
    let app_state = AppState::new(db, config.auth.clone());

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}
