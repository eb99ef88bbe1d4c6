//! Ollama - Local Ollama API provider
//!
//! Talks to a local Ollama daemon over its native HTTP API:
//! `/api/chat` for completions, `/api/show` for model metadata and
//! `/api/tags` for the installed model list.

#![allow(missing_docs)]

pub mod convert;
pub mod provider;
pub mod security;
pub mod types;


pub use provider::OllamaProvider;
pub use types::{OllamaConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
