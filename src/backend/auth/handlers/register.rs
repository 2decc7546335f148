/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate every field, collecting all failures
 * 2. Check that the username is free
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Return the public profile (no token; clients log in afterwards)
 *
 * # Validation
 *
 * - Username: required, at most 150 characters of letters, digits and `@.+-_`
 * - Email: required, must contain '@', at most 254 characters
 * - Password: at least 8 characters, repeated identically in `password2`
 * - First and last name: optional, at most 150 characters
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{create_user, get_user_by_username, NewUser, UserProfile};
use crate::backend::error::BackendError;
use crate::backend::extract::ApiJson;
use crate::backend::server::config::AuthConfig;
use crate::shared::validation::{self, FieldErrors, REQUIRED};
use crate::shared::SharedError;

const USERNAME_MAX_CHARS: usize = 150;
const EMAIL_MAX_CHARS: usize = 254;
const NAME_MAX_CHARS: usize = 150;
const PASSWORD_MIN_CHARS: usize = 8;

const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// A registration request that passed validation
#[derive(Debug)]
struct Registration {
    username: String,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

/// Validate username format
///
/// Usernames may contain letters, digits and `@`, `.`, `+`, `-`, `_`.
fn check_username(value: Option<&str>) -> Result<String, SharedError> {
    let username = validation::required_text("username", value, USERNAME_MAX_CHARS)?;
    let valid = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !valid {
        return Err(SharedError::validation(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(username)
}

fn check_email(value: Option<&str>) -> Result<String, SharedError> {
    let email = validation::required_text("email", value, EMAIL_MAX_CHARS)?;
    if !email.contains('@') {
        return Err(SharedError::validation("email", "Enter a valid email address."));
    }
    Ok(email)
}

fn check_password(value: Option<&str>) -> Result<String, SharedError> {
    let password = value.ok_or_else(|| SharedError::validation("password", REQUIRED))?;
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(SharedError::validation(
            "password",
            format!("This password is too short. It must contain at least {PASSWORD_MIN_CHARS} characters."),
        ));
    }
    Ok(password.to_string())
}

fn validate(request: &RegisterRequest) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = errors.check(check_username(request.username.as_deref()));
    let email = errors.check(check_email(request.email.as_deref()));
    let password = errors.check(check_password(request.password.as_deref()));
    let first_name = errors.check(validation::optional_text(
        "first_name",
        request.first_name.as_deref(),
        NAME_MAX_CHARS,
    ));
    let last_name = errors.check(validation::optional_text(
        "last_name",
        request.last_name.as_deref(),
        NAME_MAX_CHARS,
    ));

    match request.password2.as_deref() {
        None => errors.add("password2", REQUIRED),
        Some(repeated) if request.password.as_deref() != Some(repeated) => {
            errors.add("password", "Password fields didn't match.")
        }
        Some(_) => {}
    }

    match (username, email, password, first_name, last_name) {
        (Some(username), Some(email), Some(password), Some(first_name), Some(last_name)) if errors.is_empty() => {
            Ok(Registration {
                username,
                email,
                password,
                first_name,
                last_name,
            })
        }
        _ => Err(errors),
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|e| e.is_unique_violation())
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Field validation failed, or the username is taken
/// * `500 Internal Server Error` - Hashing or user creation failed
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "s3cret-pass",
///   "password2": "s3cret-pass",
///   "first_name": "Alice",
///   "last_name": "Liddell"
/// }
/// ```
pub async fn register(
    State(pool): State<SqlitePool>,
    State(auth): State<Arc<AuthConfig>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserProfile>), BackendError> {
    tracing::info!("Register request for username: {:?}", request.username);

    let registration = validate(&request).map_err(|errors| {
        tracing::warn!("Registration rejected: {}", errors);
        BackendError::Validation(errors)
    })?;

    if get_user_by_username(&pool, &registration.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", registration.username);
        return Err(BackendError::conflict("username", USERNAME_TAKEN));
    }

    let password_hash = hash_password(registration.password, auth.bcrypt_cost).await?;

    let new_user = NewUser {
        username: registration.username,
        email: registration.email,
        password_hash,
        first_name: registration.first_name,
        last_name: registration.last_name,
    };
    let user = create_user(&pool, new_user).await.map_err(|e| {
        if is_unique_violation(&e) {
            BackendError::conflict("username", USERNAME_TAKEN)
        } else {
            tracing::error!("Failed to create user: {:?}", e);
            BackendError::Database(e)
        }
    })?;

    tracing::info!("User registered: {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user.into())))
}
