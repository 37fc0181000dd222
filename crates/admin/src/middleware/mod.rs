//! Middleware for the back-office: sessions and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, RequireEditor};
pub use session::create_session_layer;
