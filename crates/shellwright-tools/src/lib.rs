//! Shellwright Tools - Capability schema, executors and dispatcher
//!
//! This crate provides the local execution side of Shellwright:
//! - Schema: the single `tool_call` tool and its conditional parameter rules
//! - Invocation: a model tool call decoded into capability + parameters
//! - Executors: file, command and script executors
//! - Dispatcher: routes invocations to executors, turns every failure into text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatcher;
pub mod error;
pub mod executors;
pub mod invocation;
pub mod paths;
pub mod schema;

pub use dispatcher::{Dispatcher, DispatcherConfig, ExecutionResult, Executor};
pub use error::{Error, Result};
pub use executors::{
    CommandConfig, CommandExecutor, CommandSpec, FileExecutor, ScriptConfig, ScriptExecutor,
};
pub use invocation::{Invocation, Parameters};
pub use schema::{Capability, CapabilitySchema, CAPABILITY_SCHEMA};
