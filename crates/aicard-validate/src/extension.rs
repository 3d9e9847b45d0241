//! # Extension Validator Trait & Permissive Fallback
//!
//! A service's `protocolSpecific` payload is an extensible tagged union:
//! the `type` discriminator selects which extension schema applies, and new
//! variants must be addable without touching the core. The seam is this
//! trait; the open-world default for unregistered discriminators is
//! [`PermissiveValidator`], never a closed match that rejects unknown tags.

use serde_json::Value;

use aicard_core::ValidationResult;

use crate::fields::type_name;

/// Validates one protocol family's `protocolSpecific` payload.
///
/// Implementations collect issues rather than failing fast, and must
/// tolerate unknown additional fields: an old validator has to accept
/// payloads produced against a newer extension schema.
pub trait ExtensionValidator: Send + Sync {
    /// The discriminator value this validator is registered under, used
    /// for logging and registry diagnostics.
    fn protocol_type(&self) -> &str;

    /// Validate a payload. Paths in the returned issues are relative to
    /// the payload root; the document validator re-tags them under
    /// `/services/<i>/protocolSpecific`.
    fn validate(&self, payload: &Value) -> ValidationResult;
}

/// The open-world fallback: accepts any JSON object.
///
/// Unregistered protocol types resolve to this, so a custom service with an
/// arbitrary (but well-formed) payload always validates structurally.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveValidator;

impl ExtensionValidator for PermissiveValidator {
    fn protocol_type(&self) -> &str {
        "*"
    }

    fn validate(&self, payload: &Value) -> ValidationResult {
        let mut result = ValidationResult::new();
        if !payload.is_object() {
            result.schema_error(
                "",
                format!("protocolSpecific must be an object, got {}", type_name(payload)),
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_accepts_any_object() {
        let v = PermissiveValidator;
        assert!(v.validate(&serde_json::json!({})).valid());
        assert!(v
            .validate(&serde_json::json!({"whatever": [1, {"deep": null}]}))
            .valid());
    }

    #[test]
    fn test_permissive_rejects_non_object() {
        let v = PermissiveValidator;
        assert!(!v.validate(&serde_json::json!("a string")).valid());
        assert!(!v.validate(&serde_json::json!([1, 2])).valid());
    }
}
