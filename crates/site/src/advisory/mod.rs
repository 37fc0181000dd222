//! AI plant-advisory support.
//!
//! Wraps the hosted Messages API behind [`AdvisoryClient`] and keeps the
//! prompt construction and product matching in [`prompt`]. The route layer
//! owns the degradation policy: any failure here becomes a canned fallback
//! message, never an error response.

mod client;
mod error;
pub mod prompt;
mod types;

pub use client::AdvisoryClient;
pub use error::{AdvisoryError, ApiErrorResponse};
pub use types::{ChatRequest, ChatResponse, ContentBlock, Message, Usage};
