//! Orchestrator core structure

use crate::conversation::Conversation;
use crate::planner::Planner;
use shellwright_llm::LlmProvider;
use shellwright_tools::{Capability, Dispatcher};
use std::sync::Arc;

use super::config::OrchestratorConfig;

/// Coordinates the planner and the dispatcher
///
/// Holds no per-session state; each session passes its own `Conversation`.
pub struct Orchestrator {
    pub(crate) planner: Planner,
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    #[must_use]
    pub fn new(
        llm_provider: Arc<dyn LlmProvider>,
        dispatcher: Arc<Dispatcher>,
        config: OrchestratorConfig,
    ) -> Self {
        let planner = Planner::new(llm_provider, config.planner_config.clone());
        Self {
            planner,
            dispatcher,
            config,
        }
    }

    /// Start a conversation seeded with the configured system turn
    #[must_use]
    pub fn new_conversation(&self) -> Conversation {
        Conversation::new(self.planner.config().system_prompt.clone())
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Model requests are sent with
    #[must_use]
    pub fn model(&self) -> &str {
        self.planner.model()
    }

    /// Capabilities the dispatcher can run
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        self.dispatcher.capabilities()
    }
}
