//! External-service clients for the site.

pub mod mail;

pub use mail::{EmailService, MailError};
