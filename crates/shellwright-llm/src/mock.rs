//! Mock LLM Provider for testing
//!
//! Replies are scripted up front and handed out in order; every request is
//! recorded so tests can inspect what the loop sent.

use crate::completion::{ToolCompletionRequest, ToolCompletionResponse};
use crate::error::{Error, Result};
use crate::provider::{LlmProvider, ModelInfo};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A mock LLM provider that returns queued responses
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Result<ToolCompletionResponse>>>>,
    requests: Arc<Mutex<Vec<ToolCompletionRequest>>>,
    info: ModelInfo,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider advertising tool support
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            info: ModelInfo {
                family: Some("mock".to_string()),
                capabilities: Some(vec!["completion".to_string(), "tools".to_string()]),
            },
        }
    }

    /// Override the model metadata returned by `model_info`
    #[must_use]
    pub fn with_model_info(mut self, info: ModelInfo) -> Self {
        self.info = info;
        self
    }

    /// Add a response to the queue
    pub fn add_tool_response(&self, response: ToolCompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
    }

    /// Queue a failure, returned in order like any other reply
    pub fn add_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Requests received so far
    #[must_use]
    pub fn requests(&self) -> Vec<ToolCompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(vec!["mock-model".to_string()])
    }

    async fn model_info(&self, _model: &str) -> Result<ModelInfo> {
        Ok(self.info.clone())
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let mut responses = self.responses.lock().unwrap_or_else(|e| e.into_inner());
        // An exhausted script behaves like a model that said nothing
        responses.pop_front().unwrap_or_else(|| {
            Ok(ToolCompletionResponse {
                content: None,
                tool_calls: Vec::new(),
                usage: None,
                finish_reason: Some("stop".to_string()),
                model: "mock-model".to_string(),
            })
        })
    }
}
