//! Running an invocation batch

use crate::conversation::Conversation;
use serde_json::Value;
use shellwright_llm::{Message, ToolCall};
use shellwright_tools::Invocation;
use tracing::debug;

use super::core::Orchestrator;
use super::types::InvocationRecord;

impl Orchestrator {
    /// Dispatch each call in order, appending one tool turn per result
    ///
    /// A started batch always runs to the end; cancellation is only observed
    /// between model calls.
    pub(crate) async fn execute_tool_calls(
        &self,
        conversation: &mut Conversation,
        calls: &[ToolCall],
    ) -> Vec<InvocationRecord> {
        let mut records = Vec::with_capacity(calls.len());

        for call in calls {
            let invocation = Invocation::from_tool_call(call);
            let tool = invocation.tool.clone();
            let input = Value::Object(invocation.parameters.clone());

            let result = self.dispatcher.dispatch(invocation).await;
            debug!(
                tool = %tool,
                invocation_id = %call.id,
                success = result.success,
                duration_ms = result.duration_ms,
                "Invocation finished"
            );

            conversation.push(Message::tool_response(&call.id, &result.output));
            records.push(InvocationRecord {
                invocation_id: call.id.clone(),
                tool,
                input,
                output: result.output,
                success: result.success,
                duration_ms: result.duration_ms,
            });
        }

        records
    }
}
