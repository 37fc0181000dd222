//! AI plant-advisory route handlers.
//!
//! Both endpoints follow the same degradation policy: any failure along the
//! pipeline (advisory unconfigured, API error, empty completion) is logged
//! and replaced by a canned human-readable message with a 200 status. Only
//! client errors (empty or oversized input) surface as failures.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use verdant_core::Product;

use crate::advisory::prompt;
use crate::db::{catalog, telemetry};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub message: String,
    /// Continues an existing advisory session when supplied.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Chat response body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub products: Vec<Product>,
}

/// Ask the plant advisory a question.
///
/// POST /api/ai-chat
#[instrument(skip(state, body))]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>> {
    let message = validate_input(&body.message)?;

    // Product context: needed for the prompt and for matching either way
    let products = match catalog::list_active_products(state.pool(), None, None).await {
        Ok(products) => products,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products for advisory");
            Vec::new()
        }
    };

    let reply = match state.advisory() {
        Some(client) => {
            let system = prompt::advisory_system_prompt(&products);
            match client.complete(system, message.to_owned()).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "Advisory completion failed");
                    prompt::CHAT_FALLBACK.to_string()
                }
            }
        }
        None => {
            tracing::warn!("Advisory requested but not configured");
            prompt::CHAT_FALLBACK.to_string()
        }
    };

    let exchange = format!("{message}\n{reply}");
    let matched = prompt::match_products(&products, &exchange);

    // Usage logging is fire-and-forget
    let session_id = body.session_id.unwrap_or_else(Uuid::new_v4);
    let pool = state.pool().clone();
    telemetry::spawn_best_effort("chat session", async move {
        telemetry::record_chat_exchange(&pool, session_id).await?;
        telemetry::bump_counter(&pool, "ai_chat_messages").await
    });

    Ok(Json(ChatReply {
        message: reply,
        products: matched,
    }))
}

/// Research request body.
#[derive(Debug, Deserialize)]
pub struct ResearchBody {
    pub query: String,
}

/// Research response body.
#[derive(Debug, Serialize)]
pub struct ResearchReply {
    pub insights: String,
}

/// Summarize market/growing insights for a topic.
///
/// POST /api/web-research
#[instrument(skip(state, body))]
pub async fn web_research(
    State(state): State<AppState>,
    Json(body): Json<ResearchBody>,
) -> Result<Json<ResearchReply>> {
    let query = validate_input(&body.query)?;

    let insights = match state.advisory() {
        Some(client) => match client
            .complete(prompt::research_system_prompt(), query.to_owned())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "Research completion failed");
                prompt::RESEARCH_FALLBACK.to_string()
            }
        },
        None => {
            tracing::warn!("Research requested but advisory not configured");
            prompt::RESEARCH_FALLBACK.to_string()
        }
    };

    Ok(Json(ResearchReply { insights }))
}

/// Trim and bound a client-supplied prompt input.
fn validate_input(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Please enter a message.".to_string()));
    }
    if trimmed.chars().count() > prompt::MAX_INPUT_CHARS {
        return Err(AppError::BadRequest(
            "That message is too long - please shorten it.".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_trims() {
        assert_eq!(validate_input("  hello  ").expect("valid"), "hello");
    }

    #[test]
    fn test_validate_input_rejects_empty() {
        assert!(validate_input("").is_err());
        assert!(validate_input("   \n ").is_err());
    }

    #[test]
    fn test_validate_input_rejects_oversized() {
        let big = "x".repeat(prompt::MAX_INPUT_CHARS + 1);
        assert!(validate_input(&big).is_err());

        let just_fits = "x".repeat(prompt::MAX_INPUT_CHARS);
        assert!(validate_input(&just_fits).is_ok());
    }
}
