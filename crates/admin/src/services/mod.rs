//! Services for the back-office.

pub mod auth;

pub use auth::{AuthError, AuthService};
