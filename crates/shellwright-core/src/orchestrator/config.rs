//! Orchestrator configuration

use crate::planner::PlannerConfig;

/// Model calls allowed per user turn
pub const DEFAULT_MAX_STEPS: usize = 25;

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum model calls before a turn is abandoned
    pub max_steps: usize,
    /// Planner configuration
    pub planner_config: PlannerConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            planner_config: PlannerConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step limit (at least one)
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Set the planner configuration
    #[must_use]
    pub fn with_planner_config(mut self, config: PlannerConfig) -> Self {
        self.planner_config = config;
        self
    }
}
