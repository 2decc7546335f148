//! Authentication Module
//!
//! This module is the identity service: user accounts, password hashing,
//! bearer tokens and the HTTP handlers built on them.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── password.rs     - bcrypt hashing on the blocking pool
//! ├── sessions.rs     - JWT issuance, validation and revocation
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user created → profile returned
//! 2. **Login**: username and password → credentials verified → JWT token returned
//! 3. **Requests**: `Authorization: Bearer <token>` → middleware resolves the actor
//! 4. **Logout**: the token's id is revoked; the token is refused from then on
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after `TOKEN_TTL_SECS` (30 days by default)
//! - Invalid credentials return one generic error (no user enumeration)

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest};
pub use handlers::{get_me, login, logout, register, search_users};
pub use users::{User, UserProfile};
