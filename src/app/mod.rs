//! Application wiring
//!
//! # Module Structure
//!
//! - `config`: Configuration structures
//! - `loader`: Configuration loading from files and environment
//! - `bootstrap`: Provider, startup model check and orchestrator assembly

mod bootstrap;
pub mod config;
mod loader;

pub use bootstrap::{build_orchestrator, resolve_provider, verify_model, WINDOWS_WARNING};
pub use self::config::AppConfig;
pub use loader::load_config;
