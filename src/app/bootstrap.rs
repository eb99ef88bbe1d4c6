//! Startup wiring
//!
//! config → machine detection → provider → model check → dispatcher → orchestrator

use super::config::AppConfig;
use anyhow::{Context, Result};
use shellwright_core::{Error, MachineInfo, Orchestrator};
use shellwright_llm::{LlmProvider, ModelInfo, OllamaProvider};
use shellwright_tools::Dispatcher;
use std::sync::Arc;
use tracing::{info, warn};

/// Logged on Windows outside WSL Bash
pub const WINDOWS_WARNING: &str =
    "Windows is not supported yet. Run Shellwright from WSL; see the README.";

/// Family fragment of models whose tool calling is known not to work here
const UNSUPPORTED_FAMILY: &str = "qwen3";

/// Create the Ollama provider from configuration
pub fn resolve_provider(config: &AppConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider = OllamaProvider::new(config.llm.to_ollama_config())
        .context("Failed to create Ollama provider")?;
    info!(base_url = %provider.base_url(), model = %config.llm.model, "Using Ollama provider");
    Ok(Arc::new(provider))
}

/// Refuse models that cannot drive the tool loop
///
/// Checked once per process. A backend that does not report capabilities is
/// given the benefit of the doubt.
pub async fn verify_model(
    provider: &dyn LlmProvider,
    model: &str,
) -> shellwright_core::Result<ModelInfo> {
    let info = provider.model_info(model).await?;

    match info.supports_tools() {
        Some(true) => {}
        Some(false) => {
            return Err(Error::Configuration(format!(
                "{model} doesn't support tool calling. Consider a model from the qwen2.5, mistral or llama families."
            )));
        }
        None => {
            warn!(model, "Backend did not report model capabilities; assuming tool support");
        }
    }

    if info.family_contains(UNSUPPORTED_FAMILY) || model.to_lowercase().contains(UNSUPPORTED_FAMILY)
    {
        return Err(Error::Configuration(
            "Qwen3 models aren't supported yet. Use qwen2.5 or a model from another family."
                .to_string(),
        ));
    }

    Ok(info)
}

/// Build the orchestrator for an interactive session
pub async fn build_orchestrator(
    config: &AppConfig,
    machine: &MachineInfo,
) -> Result<Orchestrator> {
    if machine.is_unsupported_windows() {
        warn!("{WINDOWS_WARNING}");
    }

    let provider = resolve_provider(config)?;
    let model_info = verify_model(provider.as_ref(), &config.llm.model).await?;
    info!(
        model = %config.llm.model,
        family = model_info.family.as_deref().unwrap_or("unknown"),
        "Model verified"
    );

    let dispatcher = Dispatcher::with_builtin_executors(
        config.dispatcher.to_dispatcher_config(),
        config.tools.command.to_command_config(),
        config.tools.script.to_script_config(),
    );

    Ok(Orchestrator::new(
        provider,
        Arc::new(dispatcher),
        config.to_orchestrator_config(machine),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellwright_llm::MockProvider;

    fn provider(family: &str, capabilities: Option<Vec<&str>>) -> MockProvider {
        MockProvider::new().with_model_info(ModelInfo {
            family: Some(family.to_string()),
            capabilities: capabilities.map(|c| c.into_iter().map(String::from).collect()),
        })
    }

    #[tokio::test]
    async fn test_model_with_tools_is_accepted() {
        let mock = provider("llama", Some(vec!["completion", "tools"]));
        let info = verify_model(&mock, "llama3.1:8b-instruct-q8_0").await.unwrap();
        assert_eq!(info.family.as_deref(), Some("llama"));
    }

    #[tokio::test]
    async fn test_model_without_tools_is_rejected() {
        let mock = provider("gemma", Some(vec!["completion"]));
        let err = verify_model(&mock, "gemma2").await.unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.starts_with("gemma2 doesn't support tool calling")));
    }

    #[tokio::test]
    async fn test_qwen3_is_rejected() {
        let mock = provider("qwen3", Some(vec!["completion", "tools"]));
        let err = verify_model(&mock, "qwen3:8b").await.unwrap_err();
        assert!(err.to_string().contains("Qwen3"));
    }

    #[tokio::test]
    async fn test_unreported_capabilities_are_allowed() {
        let mock = provider("mistral", None);
        assert!(verify_model(&mock, "mistral").await.is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_is_fatal() {
        let config = {
            let mut c = AppConfig::default();
            c.llm.base_url = "http://127.0.0.1:9".to_string();
            c.llm.timeout_secs = 2;
            c
        };
        let provider = resolve_provider(&config).unwrap();
        let err = verify_model(provider.as_ref(), "llama3.1").await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
    }
}
