//! Messages API client for the plant advisory.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::AdvisoryConfig;

use super::error::{AdvisoryError, ApiErrorResponse};
use super::types::{ChatRequest, ChatResponse, Message};

const MESSAGES_API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Advisory API client.
///
/// Thin wrapper over the hosted Messages API: one completion per call, no
/// tools, no streaming.
#[derive(Clone)]
pub struct AdvisoryClient {
    inner: Arc<AdvisoryClientInner>,
}

struct AdvisoryClientInner {
    client: reqwest::Client,
    model: String,
}

impl AdvisoryClient {
    /// Create a new advisory client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &AdvisoryConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(AdvisoryClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// The model id this client requests.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.inner.model
    }

    /// Request one completion for a single user message.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error
    /// response, or produces an empty completion.
    #[instrument(skip(self, system, user_message), fields(model = %self.inner.model))]
    pub async fn complete(
        &self,
        system: String,
        user_message: String,
    ) -> Result<String, AdvisoryError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            messages: vec![Message::user(user_message)],
            system: Some(system),
        };

        let response = self
            .inner
            .client
            .post(MESSAGES_API_URL)
            .json(&request)
            .send()
            .await?;

        let chat = self.handle_response(response).await?;

        tracing::debug!(
            input_tokens = chat.usage.input_tokens,
            output_tokens = chat.usage.output_tokens,
            "Advisory completion received"
        );

        chat.text().ok_or(AdvisoryError::EmptyCompletion)
    }

    /// Convert an HTTP response into a `ChatResponse` or a typed error.
    async fn handle_response(&self, response: reqwest::Response) -> Result<ChatResponse, AdvisoryError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body)
                .map_err(|e| AdvisoryError::Parse(format!("invalid response body: {e}")));
        }

        Err(Self::handle_error_status(status, response).await)
    }

    /// Map a non-success HTTP status to a typed error.
    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AdvisoryError {
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return AdvisoryError::RateLimited(retry_after);
        }

        let body = response.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return AdvisoryError::Unauthorized(body);
        }

        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) => AdvisoryError::Api {
                error_type: parsed.error.error_type,
                message: parsed.error.message,
            },
            Err(_) => AdvisoryError::Api {
                error_type: format!("http_{}", status.as_u16()),
                message: body,
            },
        }
    }
}
