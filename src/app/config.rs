//! Application configuration types
//!
//! Every section has serde defaults, so a partial file or a bare set of
//! environment variables still produces a working configuration.

use serde::{Deserialize, Serialize};
use shellwright_core::{OrchestratorConfig, PlannerConfig};
use shellwright_llm::{OllamaConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use shellwright_tools::{CommandConfig, DispatcherConfig, ScriptConfig};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmAppConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorAppConfig,
    #[serde(default)]
    pub tools: ToolsAppConfig,
    #[serde(default)]
    pub dispatcher: DispatcherAppConfig,
    #[serde(default)]
    pub prompt: PromptAppConfig,
}

impl AppConfig {
    /// Apply `--model` / `--host` from the command line
    pub fn apply_overrides(&mut self, model: Option<String>, host: Option<String>) {
        if let Some(model) = model {
            self.llm.model = model;
        }
        if let Some(host) = host {
            self.llm.base_url = host;
        }
    }
}

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAppConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// HTTP timeout for a single model call
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for LlmAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_llm_timeout(),
            max_tokens: None,
        }
    }
}

impl LlmAppConfig {
    pub fn to_ollama_config(&self) -> OllamaConfig {
        let config = OllamaConfig::new()
            .with_base_url(&self.base_url)
            .with_model(&self.model)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match self.max_tokens {
            Some(max) => config.with_max_tokens(max),
            None => config,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_llm_timeout() -> u64 {
    300
}

/// Orchestrator configuration (exposed to TOML)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorAppConfig {
    /// Model calls allowed per user turn
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for OrchestratorAppConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
        }
    }
}

fn default_max_steps() -> usize {
    shellwright_core::orchestrator::DEFAULT_MAX_STEPS
}

/// Executor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsAppConfig {
    #[serde(default)]
    pub command: CommandAppConfig,
    #[serde(default)]
    pub script: ScriptAppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandAppConfig {
    #[serde(default = "default_command_timeout")]
    pub timeout_secs: u64,
    /// Allow commands given as a single string and run through the shell
    #[serde(default = "default_true")]
    pub allow_raw_shell: bool,
}

impl Default for CommandAppConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_command_timeout(),
            allow_raw_shell: true,
        }
    }
}

impl CommandAppConfig {
    pub fn to_command_config(&self) -> CommandConfig {
        CommandConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_raw_shell(self.allow_raw_shell)
    }
}

fn default_command_timeout() -> u64 {
    120
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptAppConfig {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    #[serde(default = "default_script_timeout")]
    pub timeout_secs: u64,
}

impl Default for ScriptAppConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            timeout_secs: default_script_timeout(),
        }
    }
}

impl ScriptAppConfig {
    pub fn to_script_config(&self) -> ScriptConfig {
        ScriptConfig::default()
            .with_interpreter(&self.interpreter)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

fn default_interpreter() -> String {
    "python3".to_string()
}
fn default_script_timeout() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherAppConfig {
    /// Outer limit on any single invocation
    #[serde(default = "default_max_timeout")]
    pub max_timeout_secs: u64,
}

impl Default for DispatcherAppConfig {
    fn default() -> Self {
        Self {
            max_timeout_secs: default_max_timeout(),
        }
    }
}

impl DispatcherAppConfig {
    pub fn to_dispatcher_config(&self) -> DispatcherConfig {
        DispatcherConfig::default().with_max_timeout(Duration::from_secs(self.max_timeout_secs))
    }
}

fn default_max_timeout() -> u64 {
    300
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptAppConfig {
    /// Replaces the built-in system prompt; machine context is still appended
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl AppConfig {
    /// Orchestrator settings, with the system prompt tailored to `machine`
    pub fn to_orchestrator_config(
        &self,
        machine: &shellwright_core::MachineInfo,
    ) -> OrchestratorConfig {
        let mut planner = PlannerConfig::new()
            .with_model(&self.llm.model)
            .with_temperature(self.llm.temperature);
        if let Some(prompt) = self.prompt.system_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            planner = planner.with_system_prompt(prompt);
        }
        if let Some(max) = self.llm.max_tokens {
            planner = planner.with_max_tokens(max);
        }

        OrchestratorConfig::new()
            .with_max_steps(self.orchestrator.max_steps)
            .with_planner_config(planner.with_machine_info(machine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellwright_core::MachineInfo;

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("mistral-nemo".to_string()), None);

        assert_eq!(config.llm.model, "mistral-nemo");
        assert_eq!(config.llm.base_url, "http://localhost:11434");

        config.apply_overrides(None, Some("http://gpu-box:11434/".to_string()));
        assert_eq!(config.llm.to_ollama_config().base_url, "http://gpu-box:11434");
    }

    #[test]
    fn test_orchestrator_config() {
        let mut config = AppConfig::default();
        config.orchestrator.max_steps = 4;
        config.prompt.system_prompt = Some("Custom.".to_string());
        let machine = MachineInfo::from_parts("linux", Some("/bin/bash"), None);

        let orch = config.to_orchestrator_config(&machine);
        assert_eq!(orch.max_steps, 4);
        assert_eq!(orch.planner_config.model, DEFAULT_MODEL);
        assert_eq!(
            orch.planner_config.system_prompt,
            "Custom. You are running on Linux, so use Linux commands."
        );
    }

    #[test]
    fn test_blank_prompt_override_is_ignored() {
        let mut config = AppConfig::default();
        config.prompt.system_prompt = Some("  ".to_string());
        let machine = MachineInfo::from_parts("linux", None, None);

        let orch = config.to_orchestrator_config(&machine);
        assert_eq!(
            orch.planner_config.system_prompt,
            shellwright_core::planner::DEFAULT_SYSTEM_PROMPT
        );
    }
}
