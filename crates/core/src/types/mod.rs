//! Core types for Verdant.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod kind;
pub mod role;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use kind::{MediaKind, WidgetKind};
pub use role::AdminRole;
pub use slug::{Slug, SlugError};
