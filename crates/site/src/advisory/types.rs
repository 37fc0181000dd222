//! Types for the hosted Messages API.

use serde::{Deserialize, Serialize};

/// A message in a conversation with the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender ("user" or "assistant").
    pub role: String,
    /// The text content of the message.
    pub content: String,
}

impl Message {
    /// Build a user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<Message>,
    /// System prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Response from the Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique response ID.
    pub id: String,
    /// Model that generated the response.
    pub model: String,
    /// Response content blocks.
    pub content: Vec<ContentBlock>,
    /// Token usage information.
    pub usage: Usage,
}

impl ChatResponse {
    /// Concatenated text of all text blocks, `None` if the completion is empty.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .content
            .iter()
            .map(|block| {
                let ContentBlock::Text { text } = block;
                text.as_str()
            })
            .collect();

        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// A content block within a response.
///
/// The advisory never requests tool use, so text is the only block kind
/// this client understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text content.
        text: String,
    },
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Number of input tokens.
    pub input_tokens: u32,
    /// Number of output tokens.
    pub output_tokens: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_concatenates_blocks() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "model": "m",
                "content": [
                    {"type": "text", "text": "Water deeply, "},
                    {"type": "text", "text": "but infrequently."}
                ],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();

        assert_eq!(response.text().unwrap(), "Water deeply, but infrequently.");
    }

    #[test]
    fn test_response_text_empty_is_none() {
        let response: ChatResponse = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "model": "m",
                "content": [{"type": "text", "text": "   "}],
                "usage": {"input_tokens": 1, "output_tokens": 0}
            }"#,
        )
        .unwrap();

        assert!(response.text().is_none());
    }

    #[test]
    fn test_request_omits_absent_system() {
        let request = ChatRequest {
            model: "m".to_string(),
            max_tokens: 16,
            messages: vec![Message::user("hi")],
            system: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
    }
}
