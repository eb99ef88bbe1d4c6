use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama model (must advertise the `tools` capability)
pub const DEFAULT_MODEL: &str = "llama3.1:8b-instruct-q8_0";

/// Default Ollama API URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Low temperature keeps tool arguments stable
pub const DEFAULT_TEMPERATURE: f32 = 0.15;

// ============================================================================
// API Types
// ============================================================================

/// Request for the Ollama chat endpoint
#[derive(Debug, Serialize)]
pub struct OllamaChatRequest {
    pub model: String,
    pub messages: Vec<OllamaMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OllamaTool>>,
}

/// Message format for Ollama chat
#[derive(Debug, Serialize)]
pub struct OllamaMessage {
    /// system, user, assistant or tool
    pub role: String,
    pub content: String,
    /// Tool calls previously made by the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OllamaToolCall>>,
    /// Function a tool turn answers; Ollama matches results by name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

/// Model configuration options for Ollama
#[derive(Debug, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

/// Tool definition for Ollama
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaTool {
    /// Always "function"
    pub r#type: String,
    pub function: OllamaFunction,
}

/// Function definition for a tool
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaFunction {
    pub name: String,
    pub description: String,
    /// JSON schema of the parameters
    pub parameters: serde_json::Value,
}

/// A tool call made by the model
///
/// Older daemons omit `id`; newer ones include it.
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub function: OllamaFunctionCall,
}

/// Specific function call details
#[derive(Debug, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    pub name: String,
    /// Arguments as a JSON object (some models send a JSON-encoded string)
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Response from the Ollama chat endpoint
#[derive(Debug, Deserialize)]
pub struct OllamaChatResponse {
    pub model: String,
    pub message: OllamaResponseMessage,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Message format in Ollama responses
#[derive(Debug, Deserialize)]
pub struct OllamaResponseMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tool_calls: Option<Vec<OllamaToolCall>>,
}

/// Error response from Ollama API
#[derive(Debug, Deserialize)]
pub struct OllamaError {
    pub error: String,
}

/// Request for the /api/show endpoint
///
/// Ollama accepts `model`; older releases only read `name`.
#[derive(Debug, Serialize)]
pub struct OllamaShowRequest {
    pub model: String,
    pub name: String,
}

/// Response from the /api/show endpoint (only the fields we read)
#[derive(Debug, Default, Deserialize)]
pub struct OllamaShowResponse {
    #[serde(default)]
    pub details: Option<OllamaModelDetails>,
    #[serde(default)]
    pub capabilities: Option<Vec<String>>,
}

/// Model details block of /api/show
#[derive(Debug, Default, Deserialize)]
pub struct OllamaModelDetails {
    #[serde(default)]
    pub family: Option<String>,
}

/// Response from the /api/tags endpoint
#[derive(Debug, Deserialize)]
pub struct OllamaTagsResponse {
    #[serde(default)]
    pub models: Vec<OllamaModel>,
}

/// Model information from the tags response
#[derive(Debug, Deserialize)]
pub struct OllamaModel {
    pub name: String,
}

/// Ollama provider configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL (default: http://localhost:11434)
    pub base_url: String,
    pub default_model: String,
    /// Upper bound on generated tokens; `None` leaves it to the model
    pub default_max_tokens: Option<u32>,
    /// Request timeout (local inference can be slow)
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_max_tokens: None,
            timeout: Duration::from_secs(300),
        }
    }
}

impl OllamaConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL (trailing slashes are dropped)
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = Some(max_tokens);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
