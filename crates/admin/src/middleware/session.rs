//! Session middleware configuration for the back-office.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Expiry is
//! inactivity-based: every request pushes the deadline out, and a quiet
//! back-office tab is logged out after the configured timeout.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AdminConfig;

/// Session cookie name for the back-office.
pub const SESSION_COOKIE_NAME: &str = "vd_admin_session";

/// Create the session layer with `PostgreSQL` store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Admin configuration (inactivity timeout, HTTPS mode)
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &AdminConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created via migration.
    let store = PostgresStore::new(pool.clone());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::minutes(config.session_minutes),
        ))
        .with_secure(is_secure)
        // SameSite=Strict: the back-office is never embedded or deep-linked cross-site
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
