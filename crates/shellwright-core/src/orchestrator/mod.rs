//! Orchestrator - Main execution loop
//!
//! Runs one user turn to completion: ask the model, run whatever it asked
//! for, feed the results back, repeat until it answers in text.
//!
//! # Module Structure
//!
//! - `types`: Result types (TurnResult, ExecutionStatus, InvocationRecord)
//! - `config`: OrchestratorConfig
//! - `core`: Orchestrator struct and accessors
//! - `process`: The turn loop
//! - `tool_execution`: Running an invocation batch

mod config;
mod core;
mod process;
mod tool_execution;
mod types;


pub use config::{OrchestratorConfig, DEFAULT_MAX_STEPS};
pub use core::Orchestrator;
pub use types::{
    ExecutionStatus, InvocationRecord, TurnResult, CANCELLED_MESSAGE, NO_RESPONSE_MESSAGE,
};
