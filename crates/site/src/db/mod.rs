//! Database access for the public site.
//!
//! The site shares one `PostgreSQL` database with the admin binary but only
//! ever reads content tables; its writes are confined to the engagement
//! tables (`newsletter_subscribers`, `chat_sessions`, `analytics_counters`).
//!
//! Queries use the sqlx runtime API (`query_as::<_, T>`) against the record
//! shapes in `verdant-core`.

pub mod catalog;
pub mod telemetry;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
