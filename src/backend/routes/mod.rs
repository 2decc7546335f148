//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation (public routes, auth layer, fallback)
//! └── api_routes.rs   - Authenticated API endpoints
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /health` - Liveness probe
//! - `POST /api/auth/register` - User registration
//! - `POST /api/auth/login` - User login
//!
//! ## Authenticated
//!
//! Account routes under `/api/auth` and everything under `/api/projects`.
//! See [`api_routes`] for the full list.

/// Main router creation
pub mod router;

/// Authenticated API endpoints
pub mod api_routes;

pub use router::create_router;
