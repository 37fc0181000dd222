//! HTTP route handlers for the back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//!
//! # Auth
//! POST /auth/login              - Login (email + password)
//! POST /auth/logout             - Logout
//! GET  /auth/me                 - Current admin
//!
//! # Content CRUD (viewer: read-only; admin/super_admin: full)
//! GET|POST        /products     GET|PUT|DELETE /products/{id}
//! GET|POST        /categories   GET|PUT|DELETE /categories/{id}
//! GET|POST        /pages        GET|PUT|DELETE /pages/{id}
//! GET|POST        /widgets      GET|PUT|DELETE /widgets/{id}
//! GET|POST        /sliders      GET|PUT|DELETE /sliders/{id}
//!
//! # Media
//! GET  /media                   - List media rows
//! POST /media/upload            - Multipart upload (5 MB, images/PDF/mp4)
//! DELETE /media/{id}            - Delete row + best-effort blob unlink
//!
//! # Admin users (super_admin only)
//! GET  /admins                  - List admin users
//! POST /admins                  - Create admin user
//! POST /admins/deactivate       - Deactivate by email
//!
//! # Overview
//! GET  /subscribers             - Newsletter subscribers
//! GET  /chat-sessions           - Recent advisory usage
//! GET  /dashboard               - Entity counts + recent activity
//! GET  /activity?page=N         - Paged activity log
//! ```

pub mod activity;
pub mod admin_users;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod engagement;
pub mod media;
pub mod pages;
pub mod products;
pub mod sliders;
pub mod widgets;

use axum::{
    Router,
    routing::{delete, get, post},
};
use serde::Serialize;

use verdant_core::Slug;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Title prefixes trimmed before deriving a slug.
const SLUG_PREFIXES: &[&str] = &["sku:", "ref:"];

/// The uniform JSON success body for mutations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct ApiSuccess {
    pub success: bool,
}

impl ApiSuccess {
    /// The canonical success body.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Map a repository miss to a 404 naming the entity; pass other errors through.
pub(crate) fn named_not_found(err: crate::db::RepositoryError, entity: &str) -> AppError {
    match err {
        crate::db::RepositoryError::NotFound => AppError::NotFound(entity.to_string()),
        other => other.into(),
    }
}

/// Use the explicit slug when supplied, otherwise derive one from the title.
pub(crate) fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<Slug> {
    match explicit {
        Some(raw) if !raw.trim().is_empty() => Slug::parse(raw.trim())
            .map_err(|e| AppError::BadRequest(format!("Invalid slug: {e}"))),
        _ => Ok(Slug::generate(title, SLUG_PREFIXES)),
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create one entity's CRUD router.
macro_rules! crud_routes {
    ($module:ident) => {
        Router::new()
            .route("/", get($module::list).post($module::create))
            .route(
                "/{id}",
                get($module::show).put($module::update).delete($module::remove),
            )
    };
}

/// Create all routes for the back-office.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/products", crud_routes!(products))
        .nest("/categories", crud_routes!(categories))
        .nest("/pages", crud_routes!(pages))
        .nest("/widgets", crud_routes!(widgets))
        .nest("/sliders", crud_routes!(sliders))
        .route("/media", get(media::list))
        // Default axum body limit is 2 MB; uploads need 5 MB plus multipart overhead
        .route(
            "/media/upload",
            post(media::upload)
                .layer(axum::extract::DefaultBodyLimit::max(6 * 1024 * 1024)),
        )
        .route("/media/{id}", delete(media::remove))
        .route("/admins", get(admin_users::list).post(admin_users::create))
        .route("/admins/deactivate", post(admin_users::deactivate))
        .route("/subscribers", get(engagement::subscribers))
        .route("/chat-sessions", get(engagement::chat_sessions))
        .route("/dashboard", get(dashboard::show))
        .route("/activity", get(activity::list))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_slug_prefers_explicit() {
        let slug = resolve_slug(Some("hand-picked"), "Some Title").unwrap();
        assert_eq!(slug.as_str(), "hand-picked");
    }

    #[test]
    fn test_resolve_slug_derives_from_title() {
        let slug = resolve_slug(None, "Héirloom Tomato Seeds").unwrap();
        assert_eq!(slug.as_str(), "heirloom-tomato-seeds");

        // Blank explicit slug falls back to derivation too
        let slug = resolve_slug(Some("   "), "Raised Bed").unwrap();
        assert_eq!(slug.as_str(), "raised-bed");
    }

    #[test]
    fn test_resolve_slug_trims_prefixes() {
        let slug = resolve_slug(None, "SKU: Copper Trowel").unwrap();
        assert_eq!(slug.as_str(), "copper-trowel");
    }

    #[test]
    fn test_resolve_slug_rejects_bad_explicit() {
        assert!(resolve_slug(Some("Not A Slug"), "title").is_err());
    }
}
