//! Shellwright LLM - Model gateway boundary
//!
//! This crate provides the model-facing side of Shellwright:
//! - Message: conversation turns (system, user, assistant, tool)
//! - Tools: tool definitions and tool calls exchanged with the model
//! - Provider: the `LlmProvider` trait every backend implements
//! - Ollama: local Ollama provider (`/api/chat`, `/api/show`, `/api/tags`)
//! - Mock: scripted provider for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod providers;
pub mod tools;
pub mod util;

pub use completion::{CompletionRequest, TokenUsage, ToolCompletionRequest, ToolCompletionResponse};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use provider::{LlmProvider, ModelInfo};
pub use tools::{ToolCall, ToolDefinition};

// Re-export provider types
pub use providers::ollama::{OllamaConfig, OllamaProvider, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
