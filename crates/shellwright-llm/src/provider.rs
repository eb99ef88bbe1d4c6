//! LLM Provider trait definition
//!
//! This module defines the trait every model backend implements, plus the
//! model metadata used by the startup capability check.

use crate::completion::{ToolCompletionRequest, ToolCompletionResponse};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Metadata reported by a backend about one model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model family (e.g. "llama", "qwen3")
    pub family: Option<String>,
    /// Advertised capabilities (e.g. "completion", "tools")
    pub capabilities: Option<Vec<String>>,
}

impl ModelInfo {
    /// Whether the model advertises tool calling.
    ///
    /// Returns `None` when the backend did not report capabilities at all.
    #[must_use]
    pub fn supports_tools(&self) -> Option<bool> {
        self.capabilities
            .as_ref()
            .map(|caps| caps.iter().any(|c| c == "tools"))
    }

    /// Whether the model family contains the given fragment (case-insensitive)
    #[must_use]
    pub fn family_contains(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.family
            .as_deref()
            .is_some_and(|f| f.to_lowercase().contains(&fragment))
    }
}

/// Trait for LLM providers
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// List the models installed on the backend
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Describe a model (family and capabilities)
    async fn model_info(&self, model: &str) -> Result<ModelInfo>;

    /// Complete a conversation with tools
    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_tools() {
        let info = ModelInfo {
            family: Some("llama".to_string()),
            capabilities: Some(vec!["completion".to_string(), "tools".to_string()]),
        };
        assert_eq!(info.supports_tools(), Some(true));

        let info = ModelInfo {
            family: None,
            capabilities: Some(vec!["completion".to_string()]),
        };
        assert_eq!(info.supports_tools(), Some(false));

        assert_eq!(ModelInfo::default().supports_tools(), None);
    }

    #[test]
    fn test_family_contains() {
        let info = ModelInfo {
            family: Some("Qwen3".to_string()),
            capabilities: None,
        };
        assert!(info.family_contains("qwen3"));
        assert!(!info.family_contains("llama"));
        assert!(!ModelInfo::default().family_contains("qwen3"));
    }
}
