use crate::message::{Message, MessageRole};
use crate::providers::ollama::types::{
    OllamaFunction, OllamaFunctionCall, OllamaMessage, OllamaTool, OllamaToolCall,
};
use crate::tools::{ToolCall, ToolDefinition};
use std::collections::HashMap;

/// Convert messages to Ollama format
///
/// Assistant tool calls go back with their arguments as JSON objects, which
/// is the shape the daemon produced them in. Tool turns carry the name of the
/// call they answer, looked up by id among the earlier assistant turns.
pub(crate) fn convert_messages(messages: &[Message]) -> Vec<OllamaMessage> {
    let mut call_names: HashMap<&str, &str> = HashMap::new();

    messages
        .iter()
        .map(|msg| {
            for call in &msg.tool_calls {
                call_names.insert(call.id.as_str(), call.name.as_str());
            }

            let tool_calls = if msg.tool_calls.is_empty() {
                None
            } else {
                Some(msg.tool_calls.iter().map(to_ollama_call).collect())
            };
            let tool_name = match (msg.role, msg.tool_call_id.as_deref()) {
                (MessageRole::Tool, Some(id)) => call_names.get(id).map(|name| (*name).to_string()),
                _ => None,
            };

            OllamaMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
                tool_calls,
                tool_name,
            }
        })
        .collect()
}

fn to_ollama_call(call: &ToolCall) -> OllamaToolCall {
    let arguments = serde_json::from_str::<serde_json::Value>(&call.arguments)
        .ok()
        .filter(serde_json::Value::is_object)
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

    OllamaToolCall {
        id: Some(call.id.clone()),
        function: OllamaFunctionCall {
            name: call.name.clone(),
            arguments,
        },
    }
}

/// Convert tool calls in a response, assigning `call_{n}` ids where missing
pub(crate) fn convert_tool_calls(calls: Vec<OllamaToolCall>) -> Vec<ToolCall> {
    calls
        .into_iter()
        .enumerate()
        .map(|(i, tc)| {
            let arguments = match tc.function.arguments {
                serde_json::Value::String(raw) => raw,
                serde_json::Value::Null => "{}".to_string(),
                other => other.to_string(),
            };
            ToolCall {
                id: tc
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("call_{i}")),
                name: tc.function.name,
                arguments,
            }
        })
        .collect()
}

/// Convert tool definitions to Ollama format
pub(crate) fn convert_tools(tools: &[ToolDefinition]) -> Vec<OllamaTool> {
    tools
        .iter()
        .map(|tool| OllamaTool {
            r#type: "function".to_string(),
            function: OllamaFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters.clone(),
            },
        })
        .collect()
}
