/**
 * User Model and Database Operations
 *
 * The identity store: user accounts and the lookups the rest of the backend
 * needs. Projects, memberships and comments reference users by id only.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqliteExecutor;
use uuid::Uuid;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Public view of a user (no credential)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

/// Fields of a user about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

/// Create a new user
///
/// Fails with a unique violation if the username is taken.
pub async fn create_user<'e, E>(executor: E, new_user: NewUser) -> Result<User, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let user = User {
        id: Uuid::new_v4(),
        username: new_user.username,
        email: new_user.email,
        password_hash: new_user.password_hash,
        first_name: new_user.first_name,
        last_name: new_user.last_name,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, first_name, last_name, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.created_at)
    .execute(executor)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username<'e, E>(executor: E, username: &str) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, first_name, last_name, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, first_name, last_name, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

/// List user profiles, optionally restricted to one exact username
pub async fn list_users<'e, E>(executor: E, username: Option<&str>) -> Result<Vec<UserProfile>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT id, username, email, first_name, last_name
        FROM users
        WHERE ?1 IS NULL OR username = ?1
        ORDER BY username
        "#,
    )
    .bind(username)
    .fetch_all(executor)
    .await
}
