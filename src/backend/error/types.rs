/**
 * Backend Error Types
 *
 * This module defines the error type returned by services and HTTP handlers.
 * Every variant maps onto one HTTP status and one machine-readable reason
 * code, so clients can branch on `reason` without parsing messages.
 *
 * # Error Categories
 *
 * - `Validation` / `Conflict` / `InvalidCredentials` - the request is wrong (400)
 * - `AuthenticationRequired` - no valid bearer token (401)
 * - `AuthorizationDenied` - the actor's role does not allow the action (403)
 * - `NotFound` - project, user or membership absent (404)
 * - `Internal` / `Database` - the server failed (500)
 */

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::projects::membership::MembershipError;
use crate::shared::{FieldErrors, SharedError};

/// Backend-specific error types
///
/// ```rust
/// use collabhub::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::denied("delete project");
/// assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// One or more request fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The request conflicts with existing state (duplicate username,
    /// existing membership, owner role changes)
    #[error("{message}")]
    Conflict {
        /// Field the conflict is reported against
        field: &'static str,
        /// Human-readable error message
        message: String,
    },

    /// Username/password pair did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, expired or revoked bearer token
    #[error("Authentication required: {message}")]
    AuthenticationRequired {
        /// Human-readable error message
        message: String,
    },

    /// The actor's role does not permit the action
    #[error("You do not have permission to {action}.")]
    AuthorizationDenied {
        /// The attempted action, e.g. "delete project"
        action: &'static str,
    },

    /// The addressed resource does not exist
    #[error("{resource} not found.")]
    NotFound {
        /// Resource kind, e.g. "Project"
        resource: &'static str,
    },

    /// Request could not be read (malformed JSON and similar)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Server-side failure outside the database (hashing, token signing)
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors::single(field, message))
    }

    pub fn conflict(field: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            field,
            message: message.into(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::AuthenticationRequired {
            message: message.into(),
        }
    }

    pub fn denied(action: &'static str) -> Self {
        Self::AuthorizationDenied { action }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::AuthenticationRequired { .. } => StatusCode::UNAUTHORIZED,
            Self::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::HandlerError { status, .. } => *status,
            Self::Internal { .. } | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(_) | Self::HandlerError { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::InvalidCredentials => "invalid_credentials",
            Self::AuthenticationRequired { .. } => "authentication_required",
            Self::AuthorizationDenied { .. } => "permission_denied",
            Self::NotFound { .. } => "not_found",
            Self::Internal { .. } | Self::Database(_) => "internal_error",
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal failures are reported generically; their detail only goes to
    /// the log.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(_) => "Invalid input.".to_string(),
            Self::HandlerError { message, .. } => message.clone(),
            Self::Internal { .. } | Self::Database(_) => "Internal server error.".to_string(),
            other => other.to_string(),
        }
    }

    /// Per-field messages, for validation and conflict errors
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Conflict { field, message } => Some(FieldErrors::single(*field, message.clone())),
            _ => None,
        }
    }
}

impl From<FieldErrors> for BackendError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<MembershipError> for BackendError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::NotFound => Self::not_found("Membership"),
            MembershipError::AlreadyMember => {
                Self::conflict("user", "User is already in the project.")
            }
            MembershipError::OwnerRoleImmutable => {
                Self::conflict("role", "The project owner's membership cannot be changed or removed.")
            }
            MembershipError::OwnerRoleNotAssignable => {
                Self::validation("role", "The owner role cannot be assigned.")
            }
            MembershipError::InvalidRole(invalid) => Self::validation("role", invalid.to_string()),
            MembershipError::Database(err) => Self::Database(err),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::handler(rejection.status(), rejection.body_text())
    }
}
