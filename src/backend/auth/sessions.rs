/**
 * Session Management and JWT Tokens
 *
 * This module handles bearer token issuance and validation. Tokens are
 * stateless HS256 JWTs; logout is implemented by recording the token's `jti`
 * in `revoked_tokens` until the token would have expired anyway.
 */

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::server::config::AuthConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username at issue time
    pub username: String,
    /// Token ID, used for revocation
    pub jti: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// User ID from `sub`
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `config` - Signing secret and token lifetime
/// * `user_id` - User ID (UUID)
/// * `username` - Username, carried for logging
///
/// # Returns
/// JWT token string
pub fn create_token(config: &AuthConfig, user_id: Uuid, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: now + config.token_ttl_secs,
        iat: now,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &key)
}

/// Verify and decode a JWT token
///
/// Checks the signature and the expiry. Revocation is checked separately
/// with [`is_token_revoked`].
pub fn verify_token(config: &AuthConfig, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Record a token as revoked
///
/// Revoking twice is a no-op. Entries for already-expired tokens are purged
/// on the way.
pub async fn revoke_token(
    pool: &SqlitePool,
    user_id: Uuid,
    jti: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO revoked_tokens (jti, user_id, expires_at, revoked_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(jti)
    .bind(user_id)
    .bind(expires_at)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn is_token_revoked(pool: &SqlitePool, jti: &str) -> Result<bool, sqlx::Error> {
    let revoked: Option<String> = sqlx::query_scalar("SELECT jti FROM revoked_tokens WHERE jti = ?")
        .bind(jti)
        .fetch_optional(pool)
        .await?;

    Ok(revoked.is_some())
}
