use std::time::Duration;

/// Default per-command timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the command executor
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Time limit for commands whose output is captured
    pub timeout: Duration,
    /// Allow command strings to run through the platform shell.
    /// When off, only argument lists are accepted.
    pub allow_raw_shell: bool,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            allow_raw_shell: true,
        }
    }
}

impl CommandConfig {
    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable raw shell strings
    #[must_use]
    pub fn with_raw_shell(mut self, allowed: bool) -> Self {
        self.allow_raw_shell = allowed;
        self
    }
}
