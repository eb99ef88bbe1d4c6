//! The turn loop

use crate::conversation::Conversation;
use crate::error::Result;
use crate::planner::PlanStep;
use shellwright_llm::Message;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::core::Orchestrator;
use super::types::{
    ExecutionStatus, InvocationRecord, TurnResult, CANCELLED_MESSAGE, NO_RESPONSE_MESSAGE,
};

impl Orchestrator {
    /// Run one user turn until the model answers, gives up, or is cancelled
    ///
    /// The user turn is appended first. Tool failures are written back as
    /// tool turns and never end the loop; only a gateway failure returns `Err`.
    #[instrument(skip_all, fields(session_id = %conversation.session_id()))]
    pub async fn run_turn(
        &self,
        conversation: &mut Conversation,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<TurnResult> {
        let execution_id = Uuid::new_v4();
        let start = Instant::now();
        let mut invocations: Vec<InvocationRecord> = Vec::new();
        let mut steps = 0usize;

        info!(execution_id = %execution_id, "Starting turn");
        conversation.push(Message::user(input));

        let (status, response) = loop {
            if cancel.is_cancelled() {
                info!(execution_id = %execution_id, step = steps, "Turn cancelled");
                break (ExecutionStatus::Cancelled, CANCELLED_MESSAGE.to_string());
            }
            if steps >= self.config.max_steps {
                warn!(execution_id = %execution_id, max_steps = self.config.max_steps, "Step limit reached");
                break (
                    ExecutionStatus::StepLimitExceeded,
                    format!(
                        "Stopped after {} steps without a final answer.",
                        self.config.max_steps
                    ),
                );
            }
            steps += 1;

            let planned = tokio::select! {
                biased;
                () = cancel.cancelled() => None,
                result = self.planner.plan_step(conversation) => Some(result),
            };
            let Some(step) = planned else {
                info!(execution_id = %execution_id, step = steps, "Turn cancelled while waiting for the model");
                break (ExecutionStatus::Cancelled, CANCELLED_MESSAGE.to_string());
            };
            let step = step?;

            match step {
                PlanStep::Response(text) => {
                    conversation.push(Message::assistant(text.clone()));
                    break (ExecutionStatus::Completed, text);
                }
                PlanStep::ToolCalls { content, calls } => {
                    debug!(execution_id = %execution_id, step = steps, count = calls.len(), "Running tool calls");
                    conversation.push(Message::assistant_with_tool_calls(content, calls.clone()));
                    let records = self.execute_tool_calls(conversation, &calls).await;
                    invocations.extend(records);
                }
                PlanStep::Empty => {
                    warn!(execution_id = %execution_id, step = steps, "Model returned no content or tool calls");
                    break (ExecutionStatus::NoResponse, NO_RESPONSE_MESSAGE.to_string());
                }
            }
        };

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            execution_id = %execution_id,
            status = ?status,
            steps,
            invocations = invocations.len(),
            duration_ms,
            "Turn finished"
        );

        Ok(TurnResult {
            execution_id,
            status,
            response,
            invocations,
            steps,
            duration_ms,
            model: Some(self.planner.model().to_string()),
        })
    }
}
