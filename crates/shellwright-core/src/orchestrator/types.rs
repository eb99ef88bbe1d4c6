//! Orchestrator result types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reply shown when the model returned neither text nor tool calls
pub const NO_RESPONSE_MESSAGE: &str = "No response content or tool calls found.";

/// Reply shown when the user interrupted a turn
pub const CANCELLED_MESSAGE: &str = "Cancelled.";

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// The model answered in text
    Completed,
    /// The model returned nothing usable
    NoResponse,
    /// The step limit was reached while the model kept calling tools
    StepLimitExceeded,
    /// The cancellation token fired
    Cancelled,
}

/// Result of one user turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResult {
    /// Execution ID
    pub execution_id: Uuid,
    /// Final status
    pub status: ExecutionStatus,
    /// Text to show the user
    pub response: String,
    /// Invocations run during the turn, in order
    pub invocations: Vec<InvocationRecord>,
    /// Model calls made
    pub steps: usize,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
    /// Model used
    pub model: Option<String>,
}

impl TurnResult {
    /// Whether the model produced a final answer
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }
}

/// Record of a dispatched invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Tool call id
    pub invocation_id: String,
    /// Capability name as requested
    pub tool: String,
    /// Parameters sent to the executor
    pub input: serde_json::Value,
    /// Text written to the tool turn
    pub output: String,
    /// Whether it succeeded
    pub success: bool,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
