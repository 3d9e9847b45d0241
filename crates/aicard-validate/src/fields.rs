//! Field-level check helpers shared by the document and extension
//! validators. Each helper records its own issue and returns the typed
//! value on success, so call sites read as a checklist.

use serde_json::{Map, Value};

use aicard_core::ValidationResult;

/// JSON type name for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Require `obj[key]` to be a string; record an issue otherwise.
pub(crate) fn require_string<'v>(
    result: &mut ValidationResult,
    obj: &'v Map<String, Value>,
    key: &str,
    base: &str,
) -> Option<&'v str> {
    match obj.get(key) {
        None => {
            result.schema_error(format!("{base}/{key}"), format!("\"{key}\" is a required property"));
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be a string, got {}", type_name(other)),
            );
            None
        }
    }
}

/// If `obj[key]` is present, require it to be a string.
pub(crate) fn optional_string<'v>(
    result: &mut ValidationResult,
    obj: &'v Map<String, Value>,
    key: &str,
    base: &str,
) -> Option<&'v str> {
    match obj.get(key) {
        None => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be a string, got {}", type_name(other)),
            );
            None
        }
    }
}

/// Require `obj[key]` to be an object.
pub(crate) fn require_object<'v>(
    result: &mut ValidationResult,
    obj: &'v Map<String, Value>,
    key: &str,
    base: &str,
) -> Option<&'v Map<String, Value>> {
    match obj.get(key) {
        None => {
            result.schema_error(format!("{base}/{key}"), format!("\"{key}\" is a required property"));
            None
        }
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be an object, got {}", type_name(other)),
            );
            None
        }
    }
}

/// If `obj[key]` is present, require it to be an object.
pub(crate) fn optional_object<'v>(
    result: &mut ValidationResult,
    obj: &'v Map<String, Value>,
    key: &str,
    base: &str,
) -> Option<&'v Map<String, Value>> {
    match obj.get(key) {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be an object, got {}", type_name(other)),
            );
            None
        }
    }
}

/// Require `obj[key]` to be an array.
pub(crate) fn require_array<'v>(
    result: &mut ValidationResult,
    obj: &'v Map<String, Value>,
    key: &str,
    base: &str,
) -> Option<&'v Vec<Value>> {
    match obj.get(key) {
        None => {
            result.schema_error(format!("{base}/{key}"), format!("\"{key}\" is a required property"));
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be an array, got {}", type_name(other)),
            );
            None
        }
    }
}

/// If `obj[key]` is present, require it to be an array of strings.
pub(crate) fn optional_string_array(
    result: &mut ValidationResult,
    obj: &Map<String, Value>,
    key: &str,
    base: &str,
) {
    match obj.get(key) {
        None => {}
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    result.schema_error(
                        format!("{base}/{key}/{i}"),
                        format!("\"{key}\" entries must be strings, got {}", type_name(item)),
                    );
                }
            }
        }
        Some(other) => {
            result.schema_error(
                format!("{base}/{key}"),
                format!("\"{key}\" must be an array, got {}", type_name(other)),
            );
        }
    }
}
