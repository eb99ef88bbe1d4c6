//! Error types for shellwright-core
//!
//! Tool failures never reach this type; the dispatcher turns them into text.
//! What is left is fatal to a session: the model could not be reached, or
//! the configuration cannot work.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] shellwright_llm::Error),

    /// Configuration error (unsupported model, bad settings)
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Human-readable rendering for the console
pub trait UserFriendlyError {
    /// Short description of what went wrong
    fn user_message(&self) -> String;

    /// How to fix it, when there is something to suggest
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Llm(shellwright_llm::Error::Network(msg)) => {
                format!("Could not reach the model backend: {msg}")
            }
            Error::Llm(shellwright_llm::Error::Timeout(ms)) => {
                format!("The model did not answer within {ms}ms.")
            }
            Error::Llm(e) => format!("Model error: {e}"),
            Error::Configuration(msg) => format!("Configuration error: {msg}"),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Llm(shellwright_llm::Error::Network(_)) => Some(
                "Start Ollama with `ollama serve`, or point --host at a running instance."
                    .to_string(),
            ),
            Error::Llm(shellwright_llm::Error::Timeout(_)) => Some(
                "Raise llm.timeout_secs or use a smaller model.".to_string(),
            ),
            Error::Llm(shellwright_llm::Error::Api(msg)) if msg.contains("ollama pull") => {
                Some("Pull the model, then restart.".to_string())
            }
            Error::Configuration(_) => Some(
                "Check config/default.toml, SHELLWRIGHT_* variables and CLI flags.".to_string(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_has_suggestion() {
        let err = Error::from(shellwright_llm::Error::Network("refused".to_string()));
        assert!(err.user_message().contains("refused"));
        assert!(err.suggestion().unwrap().contains("ollama serve"));
    }

    #[test]
    fn test_configuration_error() {
        let err = Error::Configuration("model lacks tools".to_string());
        assert_eq!(err.to_string(), "configuration error: model lacks tools");
        assert!(err.suggestion().is_some());
    }
}
