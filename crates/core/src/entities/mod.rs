//! Persisted record shapes shared by the site and admin binaries.
//!
//! These are plain data carriers: validation lives in [`crate::types`] and
//! in the admin route layer, persistence in each binary's `db` module. With
//! the `postgres` feature they derive `sqlx::FromRow` so both binaries can
//! map rows without redeclaring the shapes.

pub mod admin;
pub mod catalog;
pub mod content;
pub mod engagement;
pub mod media;

pub use admin::{AdminActivity, AdminUser};
pub use catalog::{Category, CategoryNode, Product};
pub use content::{Page, Slider, Widget};
pub use engagement::{ChatSession, Subscriber};
pub use media::Media;
