/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration from
 * environment variables (after `dotenv`), and opening the SQLite database.
 *
 * # Variables
 *
 * | Variable                   | Default                 |
 * |----------------------------|-------------------------|
 * | `SERVER_HOST`              | `0.0.0.0`               |
 * | `SERVER_PORT`              | `3000`                  |
 * | `DATABASE_URL`             | `sqlite://collabhub.db` |
 * | `DATABASE_MAX_CONNECTIONS` | `5`                     |
 * | `JWT_SECRET`               | development fallback    |
 * | `TOKEN_TTL_SECS`           | `2592000` (30 days)     |
 * | `BCRYPT_COST`              | `bcrypt::DEFAULT_COST`  |
 *
 * # Error Handling
 *
 * A malformed value stops startup with a `ConfigError`. A missing value
 * falls back to its default.
 */

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://collabhub.db";
const DEV_JWT_SECRET: &str = "collabhub-development-secret-change-me";
const THIRTY_DAYS_SECS: i64 = 30 * 24 * 60 * 60;

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Token and password settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// HMAC secret for HS256 tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: THIRTY_DAYS_SECS,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
        }
    }
}

/// Everything `main` needs to start serving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

fn parse<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
            value: raw,
        }),
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse("SERVER_HOST", lookup("SERVER_HOST"), IpAddr::from([0, 0, 0, 0]))?;
        let port = parse("SERVER_PORT", lookup("SERVER_PORT"), 3000u16)?;

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse("DATABASE_MAX_CONNECTIONS", lookup("DATABASE_MAX_CONNECTIONS"), 5u32)?,
        };
        if database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let jwt_secret = match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => secret,
            None => {
                tracing::warn!("JWT_SECRET not set. Using the development secret; do not run like this in production.");
                DEV_JWT_SECRET.to_string()
            }
        };

        let token_ttl_secs = parse("TOKEN_TTL_SECS", lookup("TOKEN_TTL_SECS"), THIRTY_DAYS_SECS)?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOKEN_TTL_SECS",
                value: token_ttl_secs.to_string(),
                reason: "must be positive".to_string(),
            });
        }

        let bcrypt_cost = parse("BCRYPT_COST", lookup("BCRYPT_COST"), bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            database,
            auth: AuthConfig {
                jwt_secret,
                token_ttl_secs,
                bcrypt_cost,
            },
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Open the SQLite pool and run migrations
///
/// The database file is created if missing and foreign keys are enforced on
/// every connection. An in-memory database lives only as long as its single
/// connection, so the pool is pinned to one connection that never expires.
pub async fn load_database(config: &DatabaseConfig) -> Result<SqlitePool, ConfigError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let in_memory = config.url.contains(":memory:") || config.url.contains("mode=memory");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await.inspect_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.inspect_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
