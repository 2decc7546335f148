/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Request fields are optional so that missing ones come back as field errors.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::UserProfile;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    /// Letters, digits and `@.+-_`, at most 150 characters
    pub username: Option<String>,
    pub email: Option<String>,
    /// At least 8 characters (hashed before storage)
    pub password: Option<String>,
    /// Must repeat `password`
    pub password2: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Login response
///
/// Contains the bearer token and the user's public profile.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Plain acknowledgement, e.g. for logout
#[derive(Serialize, Deserialize, Debug)]
pub struct DetailResponse {
    pub detail: String,
}

/// Query string of the user search
#[derive(Deserialize, Debug, Default)]
pub struct UserSearchQuery {
    /// Exact username; empty or absent lists everyone
    pub username: Option<String>,
}
