//! Script executor - Python code in a separate interpreter process

mod runner;

#[cfg(test)]
mod tests;

use crate::dispatcher::Executor;
use crate::error::Result;
use crate::invocation::{required_str, Parameters};
use crate::schema::Capability;
use runner::ScriptOutcome;
use std::time::Duration;

/// Default interpreter
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Default script timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the script executor
#[derive(Debug, Clone)]
pub struct ScriptConfig {
    /// Interpreter binary (run with `-I`)
    pub interpreter: String,
    /// Time limit per script
    pub timeout: Duration,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ScriptConfig {
    /// Set the interpreter
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Executes `python` invocations
#[derive(Debug, Clone, Default)]
pub struct ScriptExecutor {
    config: ScriptConfig,
}

impl ScriptExecutor {
    /// Create with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    #[must_use]
    pub fn with_config(config: ScriptConfig) -> Self {
        Self { config }
    }

    /// Run code and render the outcome as result text
    pub async fn run(&self, code: &str) -> Result<String> {
        let outcome = runner::run_script(&self.config, code).await?;
        Ok(render(&outcome))
    }
}

fn render(outcome: &ScriptOutcome) -> String {
    let mut text = if outcome.locals.is_empty() {
        "Code executed successfully.".to_string()
    } else {
        let names = outcome
            .locals
            .iter()
            .map(|(name, repr)| format!("{name}: {repr}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("Code executed successfully. Output: {{{names}}}")
    };

    if !outcome.printed.is_empty() {
        text.push_str("\nPrinted output:\n");
        text.push_str(&outcome.printed);
    }
    text
}

#[async_trait::async_trait]
impl Executor for ScriptExecutor {
    fn capability(&self) -> Capability {
        Capability::Python
    }

    async fn execute(&self, parameters: Parameters) -> Result<String> {
        let code = required_str(&parameters, Capability::Python, "code")?;
        self.run(code).await
    }
}
