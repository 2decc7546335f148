//! Backend Module
//!
//! This module contains all server-side code for collabhub: an Axum HTTP
//! server over a SQLite database, with bearer token authentication and
//! role-based authorization on projects.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Identity service: users, passwords, tokens
//! - **`projects`** - Projects, memberships, comments, authorization policy
//! - **`middleware`** - Request authentication
//! - **`extract`** - JSON and path extractors with uniform error bodies
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── projects/       - Project collaboration
//! ├── middleware/     - Request middleware
//! ├── extract.rs      - Extractors
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. `auth_middleware` turns the bearer token into an `AuthenticatedUser`
//! 2. The handler passes the actor id to the project service
//! 3. The service resolves the project and the actor's role, asks the policy
//! 4. On allow, the stores are read or written inside a transaction
//! 5. Results serialize to JSON; failures become `BackendError` responses

/// Server initialization and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Projects, memberships and comments
pub mod projects;

/// Request middleware
pub mod middleware;

/// Request extractors
pub mod extract;

/// Backend error types
pub mod error;


pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
