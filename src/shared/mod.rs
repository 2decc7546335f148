//! Shared Module
//!
//! Types used by both the HTTP layer and the store/service layers that do not
//! depend on axum or sqlx: the shared error type and field validation.

/// Shared error types
pub mod error;

/// Field validation helpers
pub mod validation;

pub use error::SharedError;
pub use validation::FieldErrors;
