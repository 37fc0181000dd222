//! Database operations for the back-office.
//!
//! One module per collection:
//!
//! - [`admin_users`] - allow-list and credentials
//! - [`products`], [`categories`], [`pages`], [`widgets`], [`sliders`] - content CRUD
//! - [`media`] - media rows (blobs live in [`crate::storage`])
//! - [`activity`] - fire-and-forget activity log
//! - [`engagement`] - read-only views over site-written tables
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p verdant-cli -- migrate run
//! ```

pub mod activity;
pub mod admin_users;
pub mod categories;
pub mod engagement;
pub mod media;
pub mod pages;
pub mod products;
pub mod sliders;
pub mod widgets;

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

    /// Constraint violation (e.g., unique slug or email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Referenced entity does not exist (e.g., unknown parent category).
    #[error("invalid reference: {0}")]
    InvalidReference(String),
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

/// Map a sqlx error, converting constraint violations to typed variants.
///
/// `conflict_message` is surfaced to the client on a unique violation
/// (Postgres error 23505); foreign-key violations (23503) become
/// [`RepositoryError::InvalidReference`].
pub(crate) fn map_constraint(err: sqlx::Error, conflict_message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.code().as_deref() {
            Some("23505") => return RepositoryError::Conflict(conflict_message.to_string()),
            Some("23503") => {
                return RepositoryError::InvalidReference(
                    "a referenced record does not exist".to_string(),
                );
            }
            _ => {}
        }
    }
    RepositoryError::Database(err)
}
