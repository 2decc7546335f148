//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! the store/service layers. They describe failures that are the caller's
//! fault (bad input) rather than the server's.
//!
//! # Error Categories
//!
//! - `ValidationError` - A single field failed validation
//!
//! # Usage
//!
//! ```rust
//! use collabhub::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "This field may not be blank.");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
