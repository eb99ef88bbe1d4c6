//! CLI module for Shellwright
//!
//! Provides commands:
//! - `chat`: Interactive session (default)
//! - `doctor`: Backend and environment diagnostics

use clap::{Parser, Subcommand};

pub mod chat;
pub mod doctor;

/// Shellwright terminal assistant
#[derive(Parser, Debug)]
#[command(name = "shellwright")]
#[command(about = "Local terminal assistant driven by an Ollama model")]
#[command(version)]
pub struct Cli {
    /// Model to use (overrides llm.model)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Ollama base URL (overrides llm.base_url)
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (default)
    Chat,
    /// Check the model backend and the local environment
    Doctor,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = crate::app::load_config()?;
    config.apply_overrides(cli.model, cli.host);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run(config).await,
        Commands::Doctor => doctor::run(config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_chat() {
        let cli = Cli::parse_from(["shellwright"]);
        assert!(cli.command.is_none());
        assert!(cli.model.is_none());
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "shellwright",
            "doctor",
            "--model",
            "mistral",
            "--host",
            "http://gpu-box:11434",
        ]);
        assert!(matches!(cli.command, Some(Commands::Doctor)));
        assert_eq!(cli.model.as_deref(), Some("mistral"));
        assert_eq!(cli.host.as_deref(), Some("http://gpu-box:11434"));
    }
}
