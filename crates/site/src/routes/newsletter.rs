//! Newsletter subscription route handlers.
//!
//! Subscribing an address that is already on the list is treated as
//! success; re-subscribing clears any prior unsubscribe.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use verdant_core::Email;

use crate::db::telemetry;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Response for a subscription request.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub subscribed: String,
}

/// Subscribe to the newsletter.
///
/// POST /api/newsletter
#[instrument(skip(state), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(form): Json<SubscribeForm>,
) -> Result<Json<SubscribeResponse>> {
    let email = Email::parse(&form.email)
        .map_err(|_| AppError::BadRequest("Please enter a valid email address.".to_string()))?;

    let newly_subscribed = telemetry::subscribe(state.pool(), &email).await?;

    if newly_subscribed {
        tracing::info!(email = %email, "Newsletter subscription created");

        // Welcome email is best-effort; the subscription already stands
        if let Some(mailer) = state.mailer() {
            let mailer = mailer.clone();
            let to = email.as_str().to_owned();
            let base_url = state.config().base_url.clone();
            tokio::spawn(async move {
                if let Err(e) = mailer.send_welcome_email(&to, &base_url).await {
                    tracing::warn!(error = %e, "Welcome email failed");
                }
            });
        }
    } else {
        tracing::info!(email = %email, "Email already subscribed - treating as success");
    }

    let pool = state.pool().clone();
    telemetry::spawn_best_effort("analytics", async move {
        telemetry::bump_counter(&pool, "newsletter_signups").await
    });

    Ok(Json(SubscribeResponse {
        success: true,
        subscribed: email.into_inner(),
    }))
}
