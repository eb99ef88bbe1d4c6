//! Invocation - one decoded request to run a capability

use crate::error::{Error, Result};
use crate::schema::Capability;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shellwright_llm::ToolCall;
use tracing::debug;

/// Parameters of an invocation, as a JSON object
pub type Parameters = serde_json::Map<String, Value>;

/// A structured request from the model to run one capability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Opaque id echoed back on the tool turn
    pub id: String,
    /// Capability name as sent by the model (may be unknown)
    pub tool: String,
    /// Remaining arguments
    pub parameters: Parameters,
}

impl Invocation {
    /// Create a new invocation
    #[must_use]
    pub fn new(id: impl Into<String>, tool: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            id: id.into(),
            tool: tool.into(),
            parameters,
        }
    }

    /// Parsed capability, if the name is known
    #[must_use]
    pub fn capability(&self) -> Option<Capability> {
        Capability::parse(&self.tool)
    }

    /// Decode a model tool call
    ///
    /// The capability comes from the `tool` argument. When that is absent the
    /// function name is used, so a model calling `cli` directly still routes.
    #[must_use]
    pub fn from_tool_call(call: &ToolCall) -> Self {
        let mut parameters = match call.parse_arguments::<Value>() {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                debug!(id = %call.id, arguments = %other, "Tool call arguments are not an object");
                Parameters::new()
            }
            Err(e) => {
                debug!(id = %call.id, error = %e, "Tool call arguments are not valid JSON");
                Parameters::new()
            }
        };

        let tool = match parameters.remove("tool") {
            Some(Value::String(tool)) if !tool.trim().is_empty() => tool,
            _ => call.name.clone(),
        };

        Self {
            id: call.id.clone(),
            tool,
            parameters,
        }
    }
}

/// Optional string parameter; `null` counts as absent
pub fn str_param<'a>(params: &'a Parameters, name: &str) -> Result<Option<&'a str>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(Error::InvalidParameter {
            parameter: name.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

/// Required string parameter
pub fn required_str<'a>(
    params: &'a Parameters,
    capability: Capability,
    name: &str,
) -> Result<&'a str> {
    str_param(params, name)?.ok_or_else(|| Error::MissingParameter {
        capability: capability.to_string(),
        parameter: name.to_string(),
    })
}

/// Optional boolean parameter; models sometimes send "true"/"false" as text
pub fn bool_param(params: &Parameters, name: &str) -> Result<Option<bool>> {
    match params.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            _ => Err(Error::InvalidParameter {
                parameter: name.to_string(),
                reason: format!("expected a boolean, got '{s}'"),
            }),
        },
        Some(_) => Err(Error::InvalidParameter {
            parameter: name.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
