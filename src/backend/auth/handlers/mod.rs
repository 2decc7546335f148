//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//! Handlers are organized into focused submodules for maintainability.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response types
//! ├── register.rs   - User registration handler
//! ├── login.rs      - User authentication handler
//! ├── logout.rs     - Token revocation handler
//! ├── me.rs         - Get current user handler
//! └── search.rs     - User lookup handler
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`logout`** - POST /api/auth/logout - Revoke the presented token
//! - **`get_me`** - GET /api/auth/user - Get current user info
//! - **`search_users`** - GET /api/auth/users - Find users by username
//!
//! `register` and `login` are public; the rest sit behind the auth middleware.

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

/// User search handler
pub mod search;

// Re-export commonly used types
pub use types::{AuthResponse, DetailResponse, LoginRequest, RegisterRequest, UserSearchQuery};

// Re-export handlers
pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
pub use search::search_users;
