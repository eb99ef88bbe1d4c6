//! Shellwright Core - Conversation and orchestration loop
//!
//! This crate ties the model gateway to the local executors:
//! - Conversation: the ordered, append-only log of turns for one session
//! - Planner: sends the conversation plus the capability schema to the model
//! - Orchestrator: the tool-calling loop that runs one user turn to completion
//! - Machine: OS, terminal and distro detection used to tailor the system turn

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod conversation;
pub mod error;
pub mod machine;
pub mod orchestrator;
pub mod planner;

pub use conversation::Conversation;
pub use error::{Error, Result, UserFriendlyError};
pub use machine::MachineInfo;
pub use orchestrator::{
    ExecutionStatus, InvocationRecord, Orchestrator, OrchestratorConfig, TurnResult,
    CANCELLED_MESSAGE, NO_RESPONSE_MESSAGE,
};
pub use planner::{PlanStep, Planner, PlannerConfig};

// Re-export the cancellation token so callers need not depend on tokio-util
pub use tokio_util::sync::CancellationToken;
