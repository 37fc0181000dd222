//! Contact form route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use verdant_core::Email;

use crate::db::telemetry;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shortest message the form accepts.
const MIN_MESSAGE_CHARS: usize = 10;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// Response for a successful form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// Validate a submission, returning the parsed email.
fn validate(form: &ContactForm) -> std::result::Result<Email, String> {
    let email = Email::parse(&form.email)
        .map_err(|_| "Please enter a valid email address.".to_string())?;

    if form.name.trim().is_empty() {
        return Err("Please tell us your name.".to_string());
    }
    if form.message.trim().chars().count() < MIN_MESSAGE_CHARS {
        return Err("Please write a few more words so we can help.".to_string());
    }

    Ok(email)
}

/// Submit the contact form.
///
/// POST /api/contact
///
/// Validates the submission, then delivers it to the configured recipient
/// over SMTP. The submission counter is bumped fire-and-forget.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<Json<ContactResponse>> {
    let email = validate(&form).map_err(AppError::BadRequest)?;

    let Some(mailer) = state.mailer() else {
        tracing::error!("Contact form submitted but mail is not configured");
        return Err(AppError::Upstream("mail not configured".to_string()));
    };

    mailer
        .send_contact_notification(
            form.name.trim(),
            email.as_str(),
            form.phone.as_deref(),
            form.message.trim(),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to deliver contact form");
            AppError::Upstream(e.to_string())
        })?;

    tracing::info!(email = %email, "Contact form delivered");

    let pool = state.pool().clone();
    telemetry::spawn_best_effort("analytics", async move {
        telemetry::bump_counter(&pool, "contact_submissions").await
    });

    Ok(Json(ContactResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: None,
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        let email = validate(&form(
            "Ada",
            "ada@example.com",
            "My fiddle-leaf fig is dropping leaves.",
        ))
        .unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let err = validate(&form("Ada", "not-an-email", "long enough message")).unwrap_err();
        assert!(err.contains("valid email"));

        assert!(validate(&form("Ada", "ada@nodot", "long enough message")).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(validate(&form("  ", "ada@example.com", "long enough message")).is_err());
    }

    #[test]
    fn test_validate_rejects_short_message() {
        let err = validate(&form("Ada", "ada@example.com", "help")).unwrap_err();
        assert!(err.contains("few more words"));

        // Whitespace doesn't count toward the minimum
        assert!(validate(&form("Ada", "ada@example.com", "hi       \n\n   ")).is_err());
    }
}
