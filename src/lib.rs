//! collabhub - project collaboration backend
//!
//! Users own and share projects, give collaborators a role (owner, editor or
//! reader) and comment on them. Every action on a project is gated by the
//! actor's role.
//!
//! # Module Structure
//!
//! - **`shared`** - Transport-agnostic types
//!   - Field validation helpers and `FieldErrors`
//!   - Shared error type
//!
//! - **`backend`** - The HTTP server
//!   - Axum router, auth middleware, handlers
//!   - Identity service (register, login, logout, user lookup)
//!   - Project service with the authorization policy
//!   - SQLite persistence through `sqlx`
//!
//! # Usage
//!
//! ```rust,no_run
//! use collabhub::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod shared;
