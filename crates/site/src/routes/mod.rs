//! HTTP route handlers for the public site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (DB ping)
//!
//! # Catalog & content
//! GET  /api/products            - Active products (?category=slug&premium=bool)
//! GET  /api/products/{slug}     - Product detail
//! GET  /api/categories          - Active category tree
//! GET  /api/pages/{slug}        - Content page
//! GET  /api/widgets             - Active widgets (settings with defaults merged)
//! GET  /api/sliders             - Active sliders
//!
//! # Forms
//! POST /api/contact             - Contact form -> email to the shop
//! POST /api/newsletter          - Newsletter subscription
//!
//! # Plant advisory
//! POST /api/ai-chat             - {message} -> {message, products}
//! POST /api/web-research        - {query} -> {insights}
//!
//! # Documents
//! GET  /api/pdf-proxy           - Stream a PDF from the allowed storage host
//! ```

pub mod advisory;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod newsletter;
pub mod pdf_proxy;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog and content routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list_products))
        .route("/products/{slug}", get(catalog::show_product))
        .route("/categories", get(catalog::list_categories))
        .route("/pages/{slug}", get(content::show_page))
        .route("/widgets", get(content::list_widgets))
        .route("/sliders", get(content::list_sliders))
}

/// Create the form routes router.
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit))
        .route("/newsletter", post(newsletter::subscribe))
}

/// Create the advisory routes router.
pub fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/ai-chat", post(advisory::chat))
        .route("/web-research", post(advisory::web_research))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        catalog_routes()
            .merge(form_routes())
            .merge(advisory_routes())
            .route("/pdf-proxy", get(pdf_proxy::proxy)),
    )
}
