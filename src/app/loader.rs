//! Configuration loading
//!
//! Embedded defaults, then optional files, then environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let profile = std::env::var("SHELLWRIGHT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{profile}")).required(false))
        .add_source(File::with_name("config/local").required(false))
        // SHELLWRIGHT_LLM__MODEL, not SHELLWRIGHT__LLM__MODEL
        .add_source(
            Environment::with_prefix("SHELLWRIGHT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults_deserialize() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.model, "llama3.1:8b-instruct-q8_0");
        assert_eq!(config.orchestrator.max_steps, 25);
        assert_eq!(config.tools.command.timeout_secs, 120);
        assert!(config.tools.command.allow_raw_shell);
        assert_eq!(config.tools.script.interpreter, "python3");
        assert_eq!(config.dispatcher.max_timeout_secs, 300);
        assert!(config.prompt.system_prompt.is_none());
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str("[llm]\nmodel = \"mistral\"\n", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.tools.script.timeout_secs, 60);
    }
}
