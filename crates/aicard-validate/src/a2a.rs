//! # A2A Extension Validator
//!
//! Validates the `protocolSpecific` payload of `type: "a2a"` services.
//! The field set follows the A2A project's published payload shape:
//! `protocolVersion` and `skills` are required; transports and
//! capabilities are optional. Anything else is a forward-compatible
//! addition and passes untouched.

use serde_json::Value;

use aicard_core::ValidationResult;

use crate::extension::ExtensionValidator;
use crate::fields::{optional_object, optional_string, require_array, require_string, type_name};

/// Built-in validator for the Agent-to-Agent protocol payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct A2aValidator;

impl ExtensionValidator for A2aValidator {
    fn protocol_type(&self) -> &str {
        "a2a"
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
        optional_string(&mut result, obj, "preferredTransport", "");
        optional_object(&mut result, obj, "capabilities", "");

        if let Some(skills) = require_array(&mut result, obj, "skills", "") {
            for (i, skill) in skills.iter().enumerate() {
                let base = format!("/skills/{i}");
                match skill.as_object() {
                    Some(skill_obj) => {
                        require_string(&mut result, skill_obj, "name", &base);
                        require_string(&mut result, skill_obj, "description", &base);
                        optional_object(&mut result, skill_obj, "inputSchema", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("skill entries must be objects, got {}", type_name(skill)),
                    ),
                }
            }
        }

        if let Some(Value::Array(interfaces)) = obj.get("additionalInterfaces") {
            for (i, iface) in interfaces.iter().enumerate() {
                let base = format!("/additionalInterfaces/{i}");
                match iface.as_object() {
                    Some(iface_obj) => {
                        require_string(&mut result, iface_obj, "transport", &base);
                        require_string(&mut result, iface_obj, "url", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("interface entries must be objects, got {}", type_name(iface)),
                    ),
                }
            }
        } else if let Some(other) = obj.get("additionalInterfaces") {
            result.schema_error(
                "/additionalInterfaces",
                format!("\"additionalInterfaces\" must be an array, got {}", type_name(other)),
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> Value {
        serde_json::json!({
            "protocolVersion": "0.3.0",
            "preferredTransport": "JSONRPC",
            "capabilities": {"supportsStreaming": true},
            "skills": [
                {"name": "plan-trip", "description": "Plans a trip.", "inputSchema": {}},
                {"name": "book-hotel", "description": "Books a hotel."}
            ]
        })
    }

    #[test]
    fn test_valid_payload_accepted() {
        let result = A2aValidator.validate(&valid_payload());
        assert!(result.valid(), "unexpected issues: {result}");
    }

    #[test]
    fn test_missing_protocol_version() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("protocolVersion");
        let result = A2aValidator.validate(&payload);
        assert!(!result.valid());
        assert_eq!(result.issues()[0].path, "/protocolVersion");
    }

    #[test]
    fn test_missing_skills() {
        let result = A2aValidator.validate(&serde_json::json!({"protocolVersion": "0.3.0"}));
        assert!(!result.valid());
        assert!(result.issues().iter().any(|i| i.path == "/skills"));
    }

    #[test]
    fn test_skill_missing_description() {
        let payload = serde_json::json!({
            "protocolVersion": "0.3.0",
            "skills": [{"name": "x"}]
        });
        let result = A2aValidator.validate(&payload);
        assert!(!result.valid());
        assert!(result.issues().iter().any(|i| i.path == "/skills/0/description"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut payload = valid_payload();
        payload["brandNewA2aFeature"] = serde_json::json!({"anything": true});
        assert!(A2aValidator.validate(&payload).valid());
    }

    #[test]
    fn test_non_object_payload_rejected() {
        assert!(!A2aValidator.validate(&serde_json::json!("nope")).valid());
    }

    #[test]
    fn test_mistyped_additional_interfaces() {
        let mut payload = valid_payload();
        payload["additionalInterfaces"] = serde_json::json!([{"transport": "GRPC"}]);
        let result = A2aValidator.validate(&payload);
        assert!(result
            .issues()
            .iter()
            .any(|i| i.path == "/additionalInterfaces/0/url"));
    }
}
