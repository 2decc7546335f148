//! Password hashing
//!
//! bcrypt is deliberately slow, so both directions run on the blocking pool.

use crate::backend::error::BackendError;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| {
            tracing::error!("Failed to hash password: {:?}", e);
            BackendError::internal(format!("password hashing failed: {e}"))
        })
}

/// Check a password against a stored bcrypt hash
pub async fn verify_password(password: String, password_hash: String) -> Result<bool, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| BackendError::internal(format!("password verification task failed: {e}")))?
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            BackendError::internal(format!("password verification failed: {e}"))
        })
}
