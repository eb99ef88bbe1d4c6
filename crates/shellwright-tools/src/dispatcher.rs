//! Dispatcher - routes invocations to executors
//!
//! Every outcome, including validation failures, unknown capabilities and
//! timeouts, comes back as an `ExecutionResult` whose output is text for the
//! conversation. Nothing here fails the caller.

use crate::error::{Error, Result};
use crate::executors::{
    CommandConfig, CommandExecutor, FileExecutor, ScriptConfig, ScriptExecutor,
};
use crate::invocation::{Invocation, Parameters};
use crate::schema::{Capability, CAPABILITY_SCHEMA};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, error, instrument, warn};

/// Something that can carry out one capability
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    /// Capability this executor handles
    fn capability(&self) -> Capability;

    /// Run with already-validated parameters, returning the success text
    async fn execute(&self, parameters: Parameters) -> Result<String>;
}

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Outer time limit for any single invocation
    pub max_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_timeout: Duration::from_secs(300),
        }
    }
}

impl DispatcherConfig {
    /// Set the outer time limit
    #[must_use]
    pub fn with_max_timeout(mut self, max_timeout: Duration) -> Self {
        self.max_timeout = max_timeout;
        self
    }
}

/// Outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Id of the invocation this answers
    pub invocation_id: String,
    /// Success payload or human-readable error
    pub output: String,
    /// Whether the executor succeeded
    pub success: bool,
    /// Wall-clock time spent
    pub duration_ms: u64,
}

/// Routes invocations to registered executors by capability
pub struct Dispatcher {
    executors: HashMap<Capability, Arc<dyn Executor>>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Create an empty dispatcher
    #[must_use]
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            executors: HashMap::new(),
            config,
        }
    }

    /// Create a dispatcher with the file, command and script executors
    #[must_use]
    pub fn with_builtin_executors(
        config: DispatcherConfig,
        command: CommandConfig,
        script: ScriptConfig,
    ) -> Self {
        let mut dispatcher = Self::new(config);
        dispatcher.register(Arc::new(FileExecutor::new()));
        dispatcher.register(Arc::new(CommandExecutor::with_config(command)));
        dispatcher.register(Arc::new(ScriptExecutor::with_config(script)));
        dispatcher
    }

    /// Register an executor, replacing any previous one for its capability
    pub fn register(&mut self, executor: Arc<dyn Executor>) {
        let capability = executor.capability();
        if self.executors.insert(capability, executor).is_some() {
            warn!(tool = %capability, "Replacing existing executor");
        }
        debug!(tool = %capability, "Registered executor");
    }

    /// Registered capabilities, in schema order
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.executors.contains_key(c))
            .collect()
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Run one invocation
    #[instrument(skip(self, invocation), fields(tool = %invocation.tool, invocation_id = %invocation.id))]
    pub async fn dispatch(&self, invocation: Invocation) -> ExecutionResult {
        let start = Instant::now();
        let invocation_id = invocation.id.clone();

        let outcome = self.route(invocation).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(output) => {
                debug!(duration_ms, "Invocation completed");
                ExecutionResult {
                    invocation_id,
                    output,
                    success: true,
                    duration_ms,
                }
            }
            Err(e) => {
                if e.is_dispatch() {
                    warn!(error = %e, "Invocation rejected");
                } else {
                    error!(error = %e, duration_ms, "Invocation failed");
                }
                ExecutionResult {
                    invocation_id,
                    output: e.to_string(),
                    success: false,
                    duration_ms,
                }
            }
        }
    }

    async fn route(&self, invocation: Invocation) -> Result<String> {
        let Some(capability) = invocation.capability() else {
            warn!(tool = %invocation.tool, "Unknown tool type");
            return Err(Error::UnknownCapability(invocation.tool));
        };

        CAPABILITY_SCHEMA.validate(capability, &invocation.parameters)?;

        let executor = self
            .executors
            .get(&capability)
            .ok_or_else(|| Error::UnknownCapability(invocation.tool.clone()))?;

        let limit = self.config.max_timeout;
        match timeout(limit, executor.execute(invocation.parameters)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms = limit.as_millis() as u64, "Invocation exceeded dispatcher limit");
                Err(Error::Timeout(limit.as_millis() as u64))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn invocation(tool: &str, args: Value) -> Invocation {
        let Value::Object(parameters) = args else {
            panic!("expected object");
        };
        Invocation::new("call_0", tool, parameters)
    }

    fn mock_for(capability: Capability, reply: &'static str, times: usize) -> MockExecutor {
        let mut mock = MockExecutor::new();
        mock.expect_capability().return_const(capability);
        mock.expect_execute()
            .times(times)
            .returning(move |_| Ok(reply.to_string()));
        mock
    }

    #[tokio::test]
    async fn test_routes_each_capability_to_one_executor() {
        let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
        dispatcher.register(Arc::new(mock_for(Capability::File, "file ran", 1)));
        dispatcher.register(Arc::new(mock_for(Capability::Cli, "cli ran", 1)));
        dispatcher.register(Arc::new(mock_for(Capability::Python, "python ran", 1)));

        let file = dispatcher
            .dispatch(invocation("file", json!({"action": "read", "path": "/tmp/a"})))
            .await;
        let cli = dispatcher
            .dispatch(invocation("cli", json!({"command": "ls"})))
            .await;
        let python = dispatcher
            .dispatch(invocation("python", json!({"code": "x = 1"})))
            .await;

        assert_eq!(file.output, "file ran");
        assert_eq!(cli.output, "cli ran");
        assert_eq!(python.output, "python ran");
        assert!(file.success && cli.success && python.success);
        assert_eq!(file.invocation_id, "call_0");
    }

    #[tokio::test]
    async fn test_unknown_capability() {
        let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
        dispatcher.register(Arc::new(mock_for(Capability::Cli, "unused", 0)));

        let result = dispatcher
            .dispatch(invocation("browser", json!({"url": "x"})))
            .await;

        assert!(!result.success);
        assert_eq!(result.output, "Unknown tool type: browser");
    }

    #[tokio::test]
    async fn test_missing_parameter_never_reaches_executor() {
        let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
        dispatcher.register(Arc::new(mock_for(Capability::File, "unused", 0)));

        let result = dispatcher
            .dispatch(invocation("file", json!({"action": "write", "path": "/tmp/a"})))
            .await;

        assert!(!result.success);
        assert_eq!(
            result.output,
            "Missing required parameter 'content' for tool 'file'"
        );
    }

    #[tokio::test]
    async fn test_executor_error_becomes_text() {
        let mut mock = MockExecutor::new();
        mock.expect_capability().return_const(Capability::Cli);
        mock.expect_execute()
            .returning(|_| Err(Error::Command("nope\n".to_string())));

        let mut dispatcher = Dispatcher::new(DispatcherConfig::default());
        dispatcher.register(Arc::new(mock));

        let result = dispatcher
            .dispatch(invocation("cli", json!({"command": "false"})))
            .await;

        assert!(!result.success);
        assert_eq!(result.output, "Command failed: nope\n");
    }

    struct SlowExecutor;

    #[async_trait::async_trait]
    impl Executor for SlowExecutor {
        fn capability(&self) -> Capability {
            Capability::Python
        }

        async fn execute(&self, _parameters: Parameters) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok("late".to_string())
        }
    }

    #[tokio::test]
    async fn test_outer_timeout() {
        let mut dispatcher =
            Dispatcher::new(DispatcherConfig::default().with_max_timeout(Duration::from_millis(50)));
        dispatcher.register(Arc::new(SlowExecutor));

        let result = dispatcher
            .dispatch(invocation("python", json!({"code": "pass"})))
            .await;

        assert!(!result.success);
        assert_eq!(result.output, "Operation timed out after 50ms");
    }

    #[test]
    fn test_builtin_capabilities() {
        let dispatcher = Dispatcher::with_builtin_executors(
            DispatcherConfig::default(),
            CommandConfig::default(),
            ScriptConfig::default(),
        );
        assert_eq!(
            dispatcher.capabilities(),
            vec![Capability::File, Capability::Cli, Capability::Python]
        );
    }

    #[tokio::test]
    async fn test_builtin_file_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("x.txt");
        let dispatcher = Dispatcher::with_builtin_executors(
            DispatcherConfig::default(),
            CommandConfig::default(),
            ScriptConfig::default(),
        );

        let write = dispatcher
            .dispatch(invocation(
                "file",
                json!({"action": "write", "path": path.to_string_lossy(), "content": "hello"}),
            ))
            .await;
        assert!(write.success);

        let read = dispatcher
            .dispatch(invocation("file", json!({"action": "read", "path": path.to_string_lossy()})))
            .await;
        assert_eq!(read.output, "hello");
    }
}
