//! Error types for shellwright-tools
//!
//! The `Display` text of each variant is what ends up in the conversation,
//! so the model sees the same wording every time.

use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure
    #[error("File operation error: {0}")]
    Io(#[from] std::io::Error),

    /// Command exited non-zero (carries captured output) or could not start
    #[error("Command failed: {0}")]
    Command(String),

    /// Script raised, the interpreter is missing, or its output was unreadable
    #[error("Python execution error: {0}")]
    Script(String),

    /// Capability name is not one of file, cli, python
    #[error("Unknown tool type: {0}")]
    UnknownCapability(String),

    /// File action is not one of read, write, delete
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A parameter required by the schema is absent
    #[error("Missing required parameter '{parameter}' for tool '{capability}'")]
    MissingParameter {
        /// Capability the invocation targeted
        capability: String,
        /// Name of the absent parameter
        parameter: String,
    },

    /// A parameter is present but has the wrong shape
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        parameter: String,
        /// What was wrong with it
        reason: String,
    },

    /// Execution exceeded its time budget
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),
}

impl Error {
    /// Whether this error came from validating or routing the invocation
    #[must_use]
    pub fn is_dispatch(&self) -> bool {
        matches!(
            self,
            Self::UnknownCapability(_)
                | Self::UnknownAction(_)
                | Self::MissingParameter { .. }
                | Self::InvalidParameter { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::UnknownCapability("browser".to_string()).to_string(),
            "Unknown tool type: browser"
        );
        assert_eq!(
            Error::UnknownAction("move".to_string()).to_string(),
            "Unknown action: move"
        );
        assert_eq!(
            Error::Command("boom\n".to_string()).to_string(),
            "Command failed: boom\n"
        );
        assert_eq!(
            Error::MissingParameter {
                capability: "cli".to_string(),
                parameter: "command".to_string(),
            }
            .to_string(),
            "Missing required parameter 'command' for tool 'cli'"
        );
    }

    #[test]
    fn test_is_dispatch() {
        assert!(Error::UnknownAction("x".to_string()).is_dispatch());
        assert!(!Error::Timeout(10).is_dispatch());
        assert!(!Error::Script("x".to_string()).is_dispatch());
    }
}
