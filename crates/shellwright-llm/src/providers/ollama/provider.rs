use crate::completion::{TokenUsage, ToolCompletionRequest, ToolCompletionResponse};
use crate::error::{Error, Result};
use crate::provider::{LlmProvider, ModelInfo};
use crate::providers::ollama::{
    convert, security,
    types::{
        OllamaChatRequest, OllamaChatResponse, OllamaConfig, OllamaError, OllamaOptions,
        OllamaShowRequest, OllamaShowResponse, OllamaTagsResponse,
    },
};
use crate::util::non_blank;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Ollama local provider
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(OllamaConfig::default())
    }

    /// Base URL this provider talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request and decode the JSON body, mapping transport and API failures
    async fn send<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R> {
        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                Error::Network(format!(
                    "Failed to connect to Ollama at {}. Is Ollama running?",
                    self.config.base_url
                ))
            } else if e.is_timeout() {
                Error::Timeout(self.config.timeout.as_millis() as u64)
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<OllamaError>(&body) {
                return Err(Error::Api(security::sanitize_api_error(&error.error)));
            }
            return Err(Error::Api(security::sanitize_api_error(&format!(
                "HTTP {status}: {body}"
            ))));
        }

        serde_json::from_str(&body).map_err(|e| {
            Error::InvalidResponse(format!(
                "{e}: {}",
                crate::util::truncate_safe(&body, 200)
            ))
        })
    }
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>> {
        let tags: OllamaTagsResponse = self.send(self.client.get(self.url("/api/tags"))).await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    #[instrument(skip(self))]
    async fn model_info(&self, model: &str) -> Result<ModelInfo> {
        let request = OllamaShowRequest {
            model: model.to_string(),
            name: model.to_string(),
        };
        let show: OllamaShowResponse = self
            .send(self.client.post(self.url("/api/show")).json(&request))
            .await?;

        Ok(ModelInfo {
            family: show.details.and_then(|d| d.family),
            capabilities: show.capabilities,
        })
    }

    #[instrument(skip(self, request), fields(model = %request.request.model, tools = request.tools.len()))]
    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        let model = if request.request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.request.model.clone()
        };

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(convert::convert_tools(&request.tools))
        };

        let ollama_request = OllamaChatRequest {
            model,
            messages: convert::convert_messages(&request.request.messages),
            options: Some(OllamaOptions {
                temperature: request.request.temperature,
                num_predict: request.request.max_tokens.or(self.config.default_max_tokens),
            }),
            stream: false,
            tools,
        };

        debug!(
            messages = ollama_request.messages.len(),
            "Sending chat request to Ollama"
        );

        let response: OllamaChatResponse = self
            .send(self.client.post(self.url("/api/chat")).json(&ollama_request))
            .await?;

        let tool_calls = response
            .message
            .tool_calls
            .map(convert::convert_tool_calls)
            .unwrap_or_default();

        Ok(ToolCompletionResponse {
            content: non_blank(response.message.content),
            tool_calls,
            usage: TokenUsage::from_counts(response.prompt_eval_count, response.eval_count),
            finish_reason: response.done_reason,
            model: response.model,
        })
    }
}
