//! Command executor - shell command lines and argument lists
//!
//! A command arrives either as a string, which runs through the platform
//! shell, or as an array of strings, which runs directly with no shell.

mod config;
mod runner;


pub use config::{CommandConfig, DEFAULT_TIMEOUT_SECS};

use crate::dispatcher::Executor;
use crate::error::{Error, Result};
use crate::invocation::{bool_param, Parameters};
use crate::paths::{expand_home, expand_home_in_command};
use crate::schema::Capability;
use serde_json::Value;
use tracing::{debug, warn};

/// A command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Command line for `sh -c` (or `cmd /C` on Windows)
    Shell(String),
    /// Program followed by its arguments
    Argv(Vec<String>),
}

impl CommandSpec {
    /// Decode the `command` parameter
    pub fn from_value(value: &Value) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidParameter {
            parameter: "command".to_string(),
            reason: reason.to_string(),
        };

        match value {
            Value::String(line) if !line.trim().is_empty() => Ok(Self::Shell(line.clone())),
            Value::String(_) => Err(invalid("command is empty")),
            Value::Array(items) => {
                let argv = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| invalid("argument list must contain only strings"))?;
                if argv.is_empty() {
                    return Err(invalid("argument list is empty"));
                }
                Ok(Self::Argv(argv))
            }
            _ => Err(invalid("expected a string or an array of strings")),
        }
    }

    /// Replace a leading home marker of the command line, or of each argument
    #[must_use]
    pub fn expand_home(self) -> Self {
        match self {
            Self::Shell(line) => Self::Shell(expand_home_in_command(&line)),
            Self::Argv(argv) => Self::Argv(
                argv.into_iter()
                    .map(|arg| {
                        if arg.starts_with('~') {
                            expand_home(&arg).to_string_lossy().into_owned()
                        } else {
                            arg
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Whether this needs the platform shell
    #[must_use]
    pub fn is_shell(&self) -> bool {
        matches!(self, Self::Shell(_))
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shell(line) => f.write_str(line),
            Self::Argv(argv) => f.write_str(&argv.join(" ")),
        }
    }
}

/// Executes `cli` invocations
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    config: CommandConfig,
}

impl CommandExecutor {
    /// Create with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    #[must_use]
    pub fn with_config(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Run a decoded command
    pub async fn run(&self, spec: CommandSpec, expect_output: bool) -> Result<String> {
        if spec.is_shell() && !self.config.allow_raw_shell {
            warn!(command = %spec, "Raw shell command rejected by configuration");
            return Err(Error::InvalidParameter {
                parameter: "command".to_string(),
                reason: "raw shell commands are disabled; pass an argument list".to_string(),
            });
        }

        let spec = spec.expand_home();
        debug!(command = %spec, expect_output, "Running command");

        if expect_output {
            runner::run_captured(&spec, self.config.timeout).await
        } else {
            runner::spawn_detached(&spec)?;
            Ok(format!("Command executed: {spec}"))
        }
    }
}

#[async_trait::async_trait]
impl Executor for CommandExecutor {
    fn capability(&self) -> Capability {
        Capability::Cli
    }

    async fn execute(&self, parameters: Parameters) -> Result<String> {
        let command = parameters
            .get("command")
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::MissingParameter {
                capability: Capability::Cli.to_string(),
                parameter: "command".to_string(),
            })?;
        let spec = CommandSpec::from_value(command)?;

        // The advertised name is `expected_output`; `expect_output` is accepted too
        let expect_output = match bool_param(&parameters, "expected_output")? {
            Some(flag) => flag,
            None => bool_param(&parameters, "expect_output")?.unwrap_or(true),
        };

        self.run(spec, expect_output).await
    }
}
