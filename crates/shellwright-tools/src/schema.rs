//! Capability schema
//!
//! The model sees one tool, `tool_call`, whose `tool` argument picks the
//! capability. Which other arguments are required depends on that choice
//! (and, for files, on the action), so the rules live here once and are used
//! both to render the JSON schema sent to the model and to validate what the
//! model sends back.

use crate::error::{Error, Result};
use crate::invocation::Parameters;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shellwright_llm::ToolDefinition;
use std::sync::LazyLock;

/// A local capability the model can invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// File read/write/delete
    File,
    /// Shell command execution
    Cli,
    /// Python script execution
    Python,
}

impl Capability {
    /// All capabilities, in schema order
    pub const ALL: [Capability; 3] = [Self::File, Self::Cli, Self::Python];

    /// Returns the string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Cli => "cli",
            Self::Python => "python",
        }
    }

    /// Parse a capability name as sent by the model
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "cli" => Some(Self::Cli),
            "python" => Some(Self::Python),
            _ => None,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters required only when another parameter has a given value
#[derive(Debug, Clone)]
pub struct ConditionalRequirement {
    /// Parameter whose value is tested
    pub field: &'static str,
    /// Value that triggers the requirement
    pub equals: &'static str,
    /// Parameters then required
    pub required: &'static [&'static str],
}

/// Requirements for one capability
#[derive(Debug, Clone)]
pub struct CapabilityRule {
    /// Capability the rule applies to
    pub capability: Capability,
    /// Always required
    pub required: &'static [&'static str],
    /// Required depending on other values
    pub conditional: &'static [ConditionalRequirement],
}

/// Description of the dispatchable tool and its parameter rules
#[derive(Debug, Clone)]
pub struct CapabilitySchema {
    /// Tool name advertised to the model
    pub name: &'static str,
    /// Tool description advertised to the model
    pub description: &'static str,
    /// One rule per capability
    pub rules: Vec<CapabilityRule>,
}

/// Process-wide schema, built on first use
pub static CAPABILITY_SCHEMA: LazyLock<CapabilitySchema> = LazyLock::new(|| CapabilitySchema {
    name: "tool_call",
    description: "Perform file operations, run CLI commands, or execute Python code locally.",
    rules: vec![
        CapabilityRule {
            capability: Capability::File,
            required: &["action", "path"],
            conditional: &[ConditionalRequirement {
                field: "action",
                equals: "write",
                required: &["content"],
            }],
        },
        CapabilityRule {
            capability: Capability::Cli,
            required: &["command"],
            conditional: &[],
        },
        CapabilityRule {
            capability: Capability::Python,
            required: &["code"],
            conditional: &[],
        },
    ],
});

fn is_present(params: &Parameters, name: &str) -> bool {
    params.get(name).is_some_and(|v| !v.is_null())
}

impl CapabilitySchema {
    /// Rule for a capability
    #[must_use]
    pub fn rule(&self, capability: Capability) -> Option<&CapabilityRule> {
        self.rules.iter().find(|r| r.capability == capability)
    }

    /// Check that every parameter the capability needs is present
    pub fn validate(&self, capability: Capability, params: &Parameters) -> Result<()> {
        let Some(rule) = self.rule(capability) else {
            return Err(Error::UnknownCapability(capability.to_string()));
        };

        let missing = |parameter: &str| Error::MissingParameter {
            capability: capability.to_string(),
            parameter: parameter.to_string(),
        };

        for name in rule.required {
            if !is_present(params, name) {
                return Err(missing(name));
            }
        }

        for cond in rule.conditional {
            let triggered = params.get(cond.field).and_then(Value::as_str) == Some(cond.equals);
            if !triggered {
                continue;
            }
            for name in cond.required {
                if !is_present(params, name) {
                    return Err(missing(name));
                }
            }
        }

        Ok(())
    }

    /// Render the JSON schema, with `allOf`/`if`/`then` for the conditional rules
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut clauses = Vec::new();
        for rule in &self.rules {
            clauses.push(json!({
                "if": {"properties": {"tool": {"const": rule.capability.as_str()}}},
                "then": {"required": rule.required}
            }));
            for cond in rule.conditional {
                clauses.push(json!({
                    "if": {
                        "properties": {
                            "tool": {"const": rule.capability.as_str()},
                            cond.field: {"const": cond.equals}
                        }
                    },
                    "then": {"required": cond.required}
                }));
            }
        }

        let capabilities: Vec<&str> = self.rules.iter().map(|r| r.capability.as_str()).collect();

        json!({
            "type": "object",
            "properties": {
                "tool": {
                    "type": "string",
                    "enum": capabilities,
                    "description": "Which capability to use: file for file operations, cli for shell commands, python for running code."
                },
                "action": {
                    "type": "string",
                    "enum": ["read", "write", "delete"],
                    "description": "File action. Required when tool = file."
                },
                "path": {
                    "type": "string",
                    "description": "File path to read, write or delete. Required when tool = file."
                },
                "content": {
                    "type": "string",
                    "description": "Text to write. Required when action = write."
                },
                "command": {
                    "type": ["string", "array"],
                    "items": {"type": "string"},
                    "description": "Shell command line, or an argument list run without a shell. Required when tool = cli."
                },
                "expected_output": {
                    "type": "boolean",
                    "description": "Return the command output. Defaults to true; set false for long-running or interactive programs."
                },
                "code": {
                    "type": "string",
                    "description": "Python code to run. Required when tool = python."
                }
            },
            "required": ["tool"],
            "allOf": clauses
        })
    }

    /// Tool definition sent to the model gateway
    #[must_use]
    pub fn to_tool_definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name, self.description, self.to_json_schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_capability_parse() {
        assert_eq!(Capability::parse("file"), Some(Capability::File));
        assert_eq!(Capability::parse(" CLI "), Some(Capability::Cli));
        assert_eq!(Capability::parse("python"), Some(Capability::Python));
        assert_eq!(Capability::parse("browser"), None);
        assert_eq!(Capability::Cli.to_string(), "cli");
    }

    #[test]
    fn test_validate_file_rules() {
        let schema = &*CAPABILITY_SCHEMA;

        assert!(schema
            .validate(Capability::File, &params(json!({"action": "read", "path": "/tmp/a"})))
            .is_ok());

        let err = schema
            .validate(Capability::File, &params(json!({"action": "read"})))
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref parameter, .. } if parameter == "path"));

        let err = schema
            .validate(Capability::File, &params(json!({"action": "write", "path": "/tmp/a"})))
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter { ref parameter, .. } if parameter == "content"));
    }

    #[test]
    fn test_validate_null_counts_as_missing() {
        let err = CAPABILITY_SCHEMA
            .validate(Capability::Cli, &params(json!({"command": null})))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required parameter 'command' for tool 'cli'"
        );
    }

    #[test]
    fn test_validate_python() {
        assert!(CAPABILITY_SCHEMA
            .validate(Capability::Python, &params(json!({"code": "x = 1"})))
            .is_ok());
        assert!(CAPABILITY_SCHEMA
            .validate(Capability::Python, &params(json!({})))
            .is_err());
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = CAPABILITY_SCHEMA.to_json_schema();

        assert_eq!(schema["required"], json!(["tool"]));
        assert_eq!(schema["properties"]["tool"]["enum"], json!(["file", "cli", "python"]));

        let clauses = schema["allOf"].as_array().unwrap();
        // one per capability plus the file/write clause
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[1]["then"]["required"], json!(["content"]));
        assert_eq!(clauses[1]["if"]["properties"]["action"]["const"], "write");
    }

    #[test]
    fn test_tool_definition() {
        let def = CAPABILITY_SCHEMA.to_tool_definition();
        assert_eq!(def.name, "tool_call");
        assert!(def.parameters["allOf"].is_array());
    }
}
