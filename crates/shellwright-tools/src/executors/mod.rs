//! Built-in executors, one per capability

pub mod command;
pub mod file;
pub mod script;

pub use command::{CommandConfig, CommandExecutor, CommandSpec};
pub use file::FileExecutor;
pub use script::{ScriptConfig, ScriptExecutor};
