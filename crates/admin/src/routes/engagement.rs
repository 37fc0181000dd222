//! Engagement view route handlers: newsletter subscribers and advisory usage.

use axum::{Json, extract::State};
use tracing::instrument;

use verdant_core::{ChatSession, Subscriber};

use crate::db::engagement;
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// How many advisory sessions the usage view shows.
const CHAT_SESSION_LIMIT: i64 = 100;

/// List newsletter subscribers.
///
/// GET /subscribers
#[instrument(skip(state, _admin))]
pub async fn subscribers(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Subscriber>>> {
    Ok(Json(engagement::list_subscribers(state.pool()).await?))
}

/// List recent advisory chat sessions.
///
/// GET /chat-sessions
#[instrument(skip(state, _admin))]
pub async fn chat_sessions(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<ChatSession>>> {
    Ok(Json(
        engagement::list_chat_sessions(state.pool(), CHAT_SESSION_LIMIT).await?,
    ))
}
