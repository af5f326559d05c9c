//! Wire types for the Messages API.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::error::LLMError;

/// Body of `POST /v1/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<RequestMessage>,
}

impl MessagesRequest {
    /// A request whose only turn is `prompt` from the user.
    pub fn single_turn(model: String, max_tokens: NonZeroU32, prompt: &str) -> Self {
        Self {
            model,
            max_tokens: max_tokens.get(),
            messages: vec![RequestMessage {
                role: Role::User,
                content: prompt.to_string(),
            }],
        }
    }
}

/// A message in the request conversation.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMessage {
    pub role: Role,
    pub content: String,
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Reply from `POST /v1/messages`.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    /// Text of the first content block, unmodified.
    pub fn into_first_text(self) -> Result<String, LLMError> {
        self.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(LLMError::EmptyContent)
    }
}

/// One block of reply content. Only `text` blocks carry text.
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turn_serialization() {
        let request = MessagesRequest::single_turn(
            "claude-test".to_string(),
            NonZeroU32::new(4000).unwrap(),
            "Say hello",
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "claude-test",
                "max_tokens": 4000,
                "messages": [{"role": "user", "content": "Say hello"}]
            })
        );
    }

    #[test]
    fn response_deserialization() {
        let json = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "content": [
                {"type": "text", "text": "Hello!"},
                {"type": "text", "text": "ignored"}
            ],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 3}
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id.as_deref(), Some("msg_01"));
        assert_eq!(response.role, Some(Role::Assistant));
        assert_eq!(response.stop_reason.as_deref(), Some("end_turn"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.input_tokens, 10);
        assert_eq!(usage.output_tokens, 3);
        assert_eq!(response.into_first_text().unwrap(), "Hello!");
    }

    #[test]
    fn response_without_optional_fields() {
        let json = r#"{"content": [{"type": "text", "text": "ok"}]}"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert!(response.id.is_none());
        assert!(response.usage.is_none());
        assert!(response.stop_reason.is_none());
        assert_eq!(response.into_first_text().unwrap(), "ok");
    }

    #[test]
    fn first_text_preserves_whitespace() {
        let json = r#"{"content": [{"type": "text", "text": "  spaced\n"}]}"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_first_text().unwrap(), "  spaced\n");
    }

    #[test]
    fn empty_content_is_error() {
        let response: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(
            response.into_first_text(),
            Err(LLMError::EmptyContent)
        ));
    }

    #[test]
    fn non_text_first_block_is_error() {
        let json = r#"{
            "content": [
                {"type": "tool_use", "id": "tu_1", "name": "bash", "input": {}},
                {"type": "text", "text": "later"}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content[0].block_type, "tool_use");
        assert!(matches!(
            response.into_first_text(),
            Err(LLMError::EmptyContent)
        ));
    }
}
