//! Planner - the model gateway as the loop sees it
//!
//! Sends the conversation and the capability schema to the provider and
//! reduces the reply to one of: final text, a batch of tool calls, or nothing.

use crate::conversation::Conversation;
use crate::error::Result;
use crate::machine::MachineInfo;
use shellwright_llm::{
    CompletionRequest, LlmProvider, ToolCall, ToolCompletionRequest, ToolCompletionResponse,
    ToolDefinition, DEFAULT_TEMPERATURE,
};
use shellwright_tools::CAPABILITY_SCHEMA;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Base system prompt; machine context is appended by `with_machine_info`
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Shellwright, an assistant running in the user's terminal. \
Reply in plain text without markdown or links. When a task needs the machine, use the tool_call tool: \
file to read, write or delete files, cli to run shell commands, python to run code. \
For arithmetic, dates or web lookups, prefer a short Python script and free services that need no API key. \
Use tools rather than guessing about the machine.";

/// Planner configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// System turn content for new conversations
    pub system_prompt: String,
    /// Model name (empty means the provider default)
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Upper bound on generated tokens
    pub max_tokens: Option<u32>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: String::new(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: None,
        }
    }
}

impl PlannerConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the system prompt
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Append OS/terminal/distro context to the system prompt
    #[must_use]
    pub fn with_machine_info(mut self, machine: &MachineInfo) -> Self {
        self.system_prompt.push_str(&machine.prompt_context());
        self
    }

    /// Set the model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the token limit
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// What the model asked for
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    /// Final natural-language answer
    Response(String),
    /// Tool calls to run, with any text that came alongside them
    ToolCalls {
        /// Accompanying text, kept on the assistant turn
        content: Option<String>,
        /// Calls in the order the model emitted them
        calls: Vec<ToolCall>,
    },
    /// Neither text nor tool calls
    Empty,
}

/// Wraps a provider with the settings of one session
pub struct Planner {
    provider: Arc<dyn LlmProvider>,
    config: PlannerConfig,
    tools: Vec<ToolDefinition>,
}

impl Planner {
    /// Create a new planner
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>, config: PlannerConfig) -> Self {
        Self {
            provider,
            config,
            tools: vec![CAPABILITY_SCHEMA.to_tool_definition()],
        }
    }

    /// Get the configuration
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Model requests are sent with
    #[must_use]
    pub fn model(&self) -> &str {
        if self.config.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.config.model
        }
    }

    /// Ask the model for the next step
    #[instrument(skip(self, conversation), fields(session_id = %conversation.session_id(), turns = conversation.len()))]
    pub async fn plan_step(&self, conversation: &Conversation) -> Result<PlanStep> {
        let mut request = CompletionRequest::new(self.model())
            .with_messages(conversation.turns().to_vec());
        request.temperature = self.config.temperature;
        request.max_tokens = self.config.max_tokens;

        let response = self
            .provider
            .complete_with_tools(ToolCompletionRequest::new(request, self.tools.clone()))
            .await?;

        let usage = response.usage.as_ref();
        debug!(
            provider = self.provider.name(),
            tool_calls = response.tool_calls.len(),
            has_content = response.content.is_some(),
            finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
            prompt_tokens = usage.map(|u| u.prompt_tokens),
            completion_tokens = usage.map(|u| u.completion_tokens),
            "Model replied"
        );

        Ok(Self::response_to_step(response))
    }

    /// Reduce a provider reply; tool calls take precedence over text
    #[must_use]
    pub fn response_to_step(response: ToolCompletionResponse) -> PlanStep {
        let content = response.content.filter(|c| !c.trim().is_empty());
        if !response.tool_calls.is_empty() {
            PlanStep::ToolCalls {
                content,
                calls: response.tool_calls,
            }
        } else if let Some(text) = content {
            PlanStep::Response(text)
        } else {
            PlanStep::Empty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellwright_llm::{MessageRole, MockProvider, TokenUsage};

    fn call() -> ToolCall {
        ToolCall {
            id: "call_0".to_string(),
            name: "tool_call".to_string(),
            arguments: r#"{"tool":"cli","command":"ls"}"#.to_string(),
        }
    }

    #[test]
    fn test_planner_config() {
        let machine = MachineInfo::from_parts("linux", Some("/bin/bash"), None);
        let config = PlannerConfig::new()
            .with_system_prompt("base.")
            .with_machine_info(&machine)
            .with_model("llama3.1:8b-instruct-q8_0")
            .with_temperature(0.3);

        assert_eq!(
            config.system_prompt,
            "base. You are running on Linux, so use Linux commands."
        );
        assert_eq!(config.temperature, Some(0.3));
        assert_eq!(PlannerConfig::default().temperature, Some(0.15));
    }

    #[test]
    fn test_response_to_step() {
        assert_eq!(
            Planner::response_to_step(ToolCompletionResponse::text("done")),
            PlanStep::Response("done".to_string())
        );
        assert_eq!(
            Planner::response_to_step(ToolCompletionResponse::text("   ")),
            PlanStep::Empty
        );

        let mut both = ToolCompletionResponse::calls(vec![call()]);
        both.content = Some("let me check".to_string());
        assert_eq!(
            Planner::response_to_step(both),
            PlanStep::ToolCalls {
                content: Some("let me check".to_string()),
                calls: vec![call()],
            }
        );
    }

    #[tokio::test]
    async fn test_plan_step_sends_conversation_and_schema() {
        let provider = Arc::new(MockProvider::new());
        provider.add_tool_response(ToolCompletionResponse::text("hi"));
        let planner = Planner::new(provider.clone(), PlannerConfig::new().with_model("m"));

        let mut conversation = Conversation::new("sys");
        conversation.push(shellwright_llm::Message::user("hello"));

        let step = planner.plan_step(&conversation).await.unwrap();
        assert_eq!(step, PlanStep::Response("hi".to_string()));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request.model, "m");
        assert_eq!(requests[0].request.temperature, Some(0.15));
        assert_eq!(requests[0].request.messages[0].role, MessageRole::System);
        assert_eq!(requests[0].tools[0].name, "tool_call");
    }

    #[tokio::test]
    async fn test_plan_step_with_reported_usage() {
        let provider = Arc::new(MockProvider::new());
        let mut reply = ToolCompletionResponse::calls(vec![call()]);
        reply.usage = TokenUsage::from_counts(Some(812), Some(24));
        provider.add_tool_response(reply);
        let planner = Planner::new(provider, PlannerConfig::new());

        let mut conversation = Conversation::new("sys");
        conversation.push(shellwright_llm::Message::user("list files"));

        let step = planner.plan_step(&conversation).await.unwrap();
        assert_eq!(
            step,
            PlanStep::ToolCalls {
                content: None,
                calls: vec![call()],
            }
        );
    }

    #[test]
    fn test_model_falls_back_to_provider_default() {
        let planner = Planner::new(Arc::new(MockProvider::new()), PlannerConfig::new());
        assert_eq!(planner.model(), "mock-model");
    }
}
