//! Completion request and response types

use crate::message::Message;
use crate::tools::{ToolCall, ToolDefinition};
use serde::{Deserialize, Serialize};

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Build usage from prompt/completion counts when both are reported
    #[must_use]
    pub fn from_counts(prompt: Option<u32>, completion: Option<u32>) -> Option<Self> {
        match (prompt, completion) {
            (Some(prompt_tokens), Some(completion_tokens)) => Some(Self {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens.saturating_add(completion_tokens),
            }),
            _ => None,
        }
    }
}

/// Completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Model to use (empty means the provider default)
    pub model: String,
    /// Messages in the conversation, oldest first
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a new completion request
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add messages
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Request with tools
#[derive(Debug, Clone)]
pub struct ToolCompletionRequest {
    /// Base completion request
    pub request: CompletionRequest,
    /// Available tools
    pub tools: Vec<ToolDefinition>,
}

impl ToolCompletionRequest {
    /// Create a new tool completion request
    #[must_use]
    pub fn new(request: CompletionRequest, tools: Vec<ToolDefinition>) -> Self {
        Self { request, tools }
    }
}

/// Response that may include tool calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCompletionResponse {
    /// Text content (None when the model returned nothing or only whitespace)
    pub content: Option<String>,
    /// Tool calls requested
    pub tool_calls: Vec<ToolCall>,
    /// Token usage
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
    /// Model used
    pub model: String,
}

impl ToolCompletionResponse {
    /// Plain text reply without tool calls
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: String::new(),
        }
    }

    /// Reply carrying tool calls and no text
    #[must_use]
    pub fn calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: String::new(),
        }
    }

    /// Check if the response has tool calls
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new("llama3.1:8b-instruct-q8_0")
            .with_messages(vec![Message::system("be brief"), Message::user("hi")])
            .with_max_tokens(256)
            .with_temperature(0.15);

        assert_eq!(request.model, "llama3.1:8b-instruct-q8_0");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.temperature, Some(0.15));
    }

    #[test]
    fn test_tool_completion_request() {
        let tools = vec![ToolDefinition::new("tool_call", "run", serde_json::json!({}))];
        let request = ToolCompletionRequest::new(CompletionRequest::new("m"), tools);

        assert_eq!(request.tools.len(), 1);
    }

    #[test]
    fn test_response_helpers() {
        assert!(!ToolCompletionResponse::text("hello").has_tool_calls());

        let response = ToolCompletionResponse::calls(vec![ToolCall {
            id: "call_0".to_string(),
            name: "tool_call".to_string(),
            arguments: "{}".to_string(),
        }]);
        assert!(response.has_tool_calls());
        assert!(response.content.is_none());
    }

    #[test]
    fn test_usage_from_counts() {
        let usage = TokenUsage::from_counts(Some(10), Some(5)).unwrap();
        assert_eq!(usage.total_tokens, 15);
        assert!(TokenUsage::from_counts(Some(10), None).is_none());

        let saturated = TokenUsage::from_counts(Some(u32::MAX), Some(1)).unwrap();
        assert_eq!(saturated.total_tokens, u32::MAX);
    }
}
