//! # MCP Extension Validator
//!
//! Validates the `protocolSpecific` payload of `type: "mcp"` services.
//! `tools`, `prompts`, and `resources` each accept either a literal list or
//! the sentinel string `"dynamic"`, meaning "enumerate via a live protocol
//! call, not in this document".

use serde_json::Value;

use aicard_core::ValidationResult;

use crate::extension::ExtensionValidator;
use crate::fields::{optional_object, optional_string, require_object, require_string, type_name};

/// The sentinel for "enumerated at runtime, not declared here".
const DYNAMIC: &str = "dynamic";

/// Built-in validator for the Model Context Protocol payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct McpValidator;

impl ExtensionValidator for McpValidator {
    fn protocol_type(&self) -> &str {
        "mcp"
    }

    fn validate(&self, payload: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();
        let Some(obj) = payload.as_object() else {
            result.schema_error(
                "",
                format!("protocolSpecific must be an object, got {}", type_name(payload)),
            );
            return result;
        };

        require_string(&mut result, obj, "protocolVersion", "");
        require_object(&mut result, obj, "capabilities", "");
        optional_string(&mut result, obj, "transportType", "");
        optional_object(&mut result, obj, "requires", "");

        if let Some(tools) = dynamic_or_list(&mut result, obj, "tools") {
            for (i, tool) in tools.iter().enumerate() {
                let base = format!("/tools/{i}");
                match tool.as_object() {
                    Some(tool_obj) => {
                        require_string(&mut result, tool_obj, "name", &base);
                        require_string(&mut result, tool_obj, "description", &base);
                        optional_object(&mut result, tool_obj, "inputSchema", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("tool entries must be objects, got {}", type_name(tool)),
                    ),
                }
            }
        }

        if let Some(prompts) = dynamic_or_list(&mut result, obj, "prompts") {
            for (i, prompt) in prompts.iter().enumerate() {
                let base = format!("/prompts/{i}");
                match prompt.as_object() {
                    Some(prompt_obj) => {
                        require_string(&mut result, prompt_obj, "name", &base);
                        require_string(&mut result, prompt_obj, "description", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("prompt entries must be objects, got {}", type_name(prompt)),
                    ),
                }
            }
        }

        if let Some(resources) = dynamic_or_list(&mut result, obj, "resources") {
            for (i, resource) in resources.iter().enumerate() {
                let base = format!("/resources/{i}");
                match resource.as_object() {
                    Some(resource_obj) => {
                        require_string(&mut result, resource_obj, "name", &base);
                        require_string(&mut result, resource_obj, "uri", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("resource entries must be objects, got {}", type_name(resource)),
                    ),
                }
            }
        }

        result
    }
}

/// Check a required MCP field that is either the `"dynamic"` sentinel or a
/// literal list. Returns the list when there is one to walk.
fn dynamic_or_list<'v>(
    result: &mut ValidationResult,
    obj: &'v serde_json::Map<String, Value>,
    key: &str,
) -> Option<&'v Vec<Value>> {
    match obj.get(key) {
        None => {
            result.schema_error(format!("/{key}"), format!("\"{key}\" is a required property"));
            None
        }
        Some(Value::String(s)) if s == DYNAMIC => None,
        Some(Value::String(other)) => {
            result.schema_error(
                format!("/{key}"),
                format!("\"{key}\" must be a list or the string \"dynamic\", got \"{other}\""),
            );
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            result.schema_error(
                format!("/{key}"),
                format!(
                    "\"{key}\" must be a list or the string \"dynamic\", got {}",
                    type_name(other)
                ),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> Value {
        serde_json::json!({
            "protocolVersion": "2025-03-26",
            "transportType": "streamable-http",
            "capabilities": {"tools": {"listChanged": true}},
            "tools": [{"name": "search", "description": "Searches.", "inputSchema": {}}],
            "prompts": "dynamic",
            "resources": [{"name": "docs", "uri": "file:///docs"}]
        })
    }

    #[test]
    fn test_valid_payload_accepted() {
        let result = McpValidator.validate(&valid_payload());
        assert!(result.valid(), "unexpected issues: {result}");
    }

    #[test]
    fn test_all_dynamic_accepted() {
        let payload = serde_json::json!({
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "tools": "dynamic",
            "prompts": "dynamic",
            "resources": "dynamic"
        });
        assert!(McpValidator.validate(&payload).valid());
    }

    #[test]
    fn test_tool_missing_description() {
        let mut payload = valid_payload();
        payload["tools"] = serde_json::json!([{"name": "x"}]);
        let result = McpValidator.validate(&payload);
        assert!(!result.valid());
        assert!(result.issues().iter().any(|i| i.path == "/tools/0/description"));
    }

    #[test]
    fn test_missing_capabilities() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("capabilities");
        let result = McpValidator.validate(&payload);
        assert!(result.issues().iter().any(|i| i.path == "/capabilities"));
    }

    #[test]
    fn test_missing_tools_prompts_resources_all_reported() {
        let payload = serde_json::json!({"protocolVersion": "2025-03-26", "capabilities": {}});
        let result = McpValidator.validate(&payload);
        let paths: Vec<&str> = result.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["/tools", "/prompts", "/resources"]);
    }

    #[test]
    fn test_wrong_sentinel_string_rejected() {
        let mut payload = valid_payload();
        payload["tools"] = serde_json::json!("static");
        let result = McpValidator.validate(&payload);
        assert!(!result.valid());
        assert!(result.issues()[0].message.contains("dynamic"));
    }

    #[test]
    fn test_resource_missing_uri() {
        let mut payload = valid_payload();
        payload["resources"] = serde_json::json!([{"name": "docs"}]);
        let result = McpValidator.validate(&payload);
        assert!(result.issues().iter().any(|i| i.path == "/resources/0/uri"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut payload = valid_payload();
        payload["experimental"] = serde_json::json!({"sampling": {}});
        assert!(McpValidator.validate(&payload).valid());
    }
}
