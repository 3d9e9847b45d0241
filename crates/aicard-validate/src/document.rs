//! # Document Validator
//!
//! Structural validation of raw `AICard` and `AICatalog` documents.
//!
//! ## Design
//!
//! Every missing or mistyped field becomes a distinct issue tagged with a
//! JSON-Pointer path; validation walks the whole document rather than
//! stopping at the first problem. Tolerated legacy draft shapes (singular
//! `endpoint`, services map, flattened identity `id`) are `warning`s, not
//! errors. Each service's `protocolSpecific` payload is dispatched through
//! the extension registry and its issues re-tagged into document scope.
//!
//! The traversal order is fixed — declaration order for fields, index
//! order for services — so repeated runs over the same document produce
//! identical issue lists.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use aicard_core::error::DocumentError;
use aicard_core::ValidationResult;

use crate::fields::{
    optional_object, optional_string, optional_string_array, require_array, require_object,
    require_string, type_name,
};
use crate::registry::ExtensionRegistry;

/// Which document shape to validate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A full per-agent AI Card.
    Card,
    /// A host-wide AI Catalog index.
    Catalog,
}

/// The result of structural validation.
///
/// Besides the aggregate issue list, records per service index whether the
/// extension validator accepted the `protocolSpecific` payload — the
/// invariant checker cross-checks reserved protocol types against this
/// instead of re-running the validators.
#[derive(Debug, Clone, Default)]
pub struct DocumentOutcome {
    /// All structural issues, in document order.
    pub result: ValidationResult,
    /// Service index → whether its extension payload passed.
    pub extension_passed: BTreeMap<usize, bool>,
}

/// The spec major version this validator recognizes.
const SUPPORTED_MAJOR: u64 = 1;

/// Parse raw text into a JSON document.
///
/// This is the only hard rejection in the engine: input that is not JSON
/// at all cannot be validated, so it fails before validation begins.
pub fn parse_document(text: &str) -> Result<Value, DocumentError> {
    Ok(serde_json::from_str(text)?)
}

/// Validates raw documents against the card/catalog structure, dispatching
/// extension payloads through a registry.
#[derive(Debug, Clone)]
pub struct DocumentValidator {
    registry: ExtensionRegistry,
}

impl DocumentValidator {
    /// Create a validator over a composed extension registry.
    pub fn new(registry: ExtensionRegistry) -> Self {
        Self { registry }
    }

    /// The registry this validator dispatches through.
    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Structurally validate a document of the given kind.
    pub fn validate(&self, doc: &Value, kind: DocumentKind) -> DocumentOutcome {
        let mut outcome = DocumentOutcome::default();
        let Some(obj) = doc.as_object() else {
            outcome.result.schema_error(
                "",
                format!("document must be a JSON object, got {}", type_name(doc)),
            );
            return outcome;
        };
        match kind {
            DocumentKind::Card => self.validate_card(obj, &mut outcome),
            DocumentKind::Catalog => self.validate_catalog(obj, &mut outcome),
        }
        outcome
    }

    fn validate_card(&self, obj: &Map<String, Value>, outcome: &mut DocumentOutcome) {
        let result = &mut outcome.result;

        require_string(result, obj, "$schema", "");
        if let Some(version) = require_string(result, obj, "specVersion", "") {
            check_spec_version(result, version);
        }
        require_nonempty_string(result, obj, "id", "");
        require_string(result, obj, "name", "");
        require_string(result, obj, "description", "");
        optional_string(result, obj, "logoUrl", "");
        optional_string_array(result, obj, "tags", "");

        if let Some(publisher) = require_object(result, obj, "publisher", "") {
            validate_identity_block(result, publisher, "/publisher");
            require_string(result, publisher, "name", "/publisher");
            if let Some(attestation) = optional_object(result, publisher, "attestation", "/publisher")
            {
                require_string(result, attestation, "type", "/publisher/attestation");
            }
        }

        if let Some(trust) = require_object(result, obj, "trust", "") {
            validate_identity_block(result, trust, "/trust");
            optional_string(result, trust, "privacyPolicyUrl", "/trust");
            optional_string(result, trust, "termsOfServiceUrl", "/trust");
            match trust.get("attestations") {
                None => {}
                Some(Value::Array(items)) => {
                    for (i, item) in items.iter().enumerate() {
                        let base = format!("/trust/attestations/{i}");
                        match item.as_object() {
                            Some(att) => {
                                require_string(result, att, "type", &base);
                            }
                            None => result.schema_error(
                                base,
                                format!("attestations entries must be objects, got {}", type_name(item)),
                            ),
                        }
                    }
                }
                Some(other) => result.schema_error(
                    "/trust/attestations",
                    format!("\"attestations\" must be an array, got {}", type_name(other)),
                ),
            }
        }

        if let Some(maturity) = optional_string(result, obj, "maturity", "") {
            if !matches!(maturity, "preview" | "stable" | "deprecated") {
                result.schema_warning(
                    "/maturity",
                    format!("unrecognized maturity stage \"{maturity}\""),
                );
            }
        }

        self.validate_services(obj, outcome);

        let result = &mut outcome.result;
        require_string(result, obj, "createdAt", "");
        require_string(result, obj, "updatedAt", "");
        optional_string(result, obj, "signature", "");
        if let Some(metadata) = obj.get("metadata") {
            if !metadata.is_object() {
                result.schema_error(
                    "/metadata",
                    format!("\"metadata\" must be an object, got {}", type_name(metadata)),
                );
            }
        }
    }

    fn validate_services(&self, obj: &Map<String, Value>, outcome: &mut DocumentOutcome) {
        match obj.get("services") {
            None => outcome
                .result
                .schema_error("/services", "\"services\" is a required property"),
            Some(Value::Array(services)) => {
                for (i, svc) in services.iter().enumerate() {
                    let path = format!("/services/{i}");
                    self.validate_service(outcome, i, &path, svc, None);
                }
            }
            Some(Value::Object(services)) => {
                // Early-draft shape: a map keyed by protocol type. Map
                // iteration is key-ordered, matching the normalized array.
                outcome.result.schema_warning(
                    "/services",
                    "legacy services map; prefer an array of service objects",
                );
                for (i, (key, svc)) in services.iter().enumerate() {
                    let path = format!("/services/{key}");
                    self.validate_service(outcome, i, &path, svc, Some(key.as_str()));
                }
            }
            Some(other) => outcome.result.schema_error(
                "/services",
                format!("\"services\" must be an array, got {}", type_name(other)),
            ),
        }
    }

    fn validate_service(
        &self,
        outcome: &mut DocumentOutcome,
        index: usize,
        path: &str,
        svc: &Value,
        fallback_type: Option<&str>,
    ) {
        let result = &mut outcome.result;
        let Some(svc_obj) = svc.as_object() else {
            result.schema_error(
                path.to_string(),
                format!("service entries must be objects, got {}", type_name(svc)),
            );
            outcome.extension_passed.insert(index, false);
            return;
        };

        let service_type = match svc_obj.get("type") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                result.schema_error(
                    format!("{path}/type"),
                    format!("\"type\" must be a string, got {}", type_name(other)),
                );
                None
            }
            None => {
                if fallback_type.is_none() {
                    result.schema_error(
                        format!("{path}/type"),
                        "\"type\" is a required property",
                    );
                }
                fallback_type
            }
        };

        require_string(result, svc_obj, "name", path);
        validate_endpoints(result, svc_obj, path);

        // authentication is protocol-defined and opaque: any JSON value is
        // stored and forwarded, never checked.

        match svc_obj.get("protocolSpecific") {
            None => {
                result.schema_error(
                    format!("{path}/protocolSpecific"),
                    "\"protocolSpecific\" is a required property",
                );
                outcome.extension_passed.insert(index, false);
            }
            Some(payload) => {
                let validator = self
                    .registry
                    .resolve_or_permissive(service_type.unwrap_or_default());
                let sub = validator.validate(payload);
                outcome.extension_passed.insert(index, sub.valid());
                outcome
                    .result
                    .merge_prefixed(&format!("{path}/protocolSpecific"), sub);
            }
        }
    }

    fn validate_catalog(&self, obj: &Map<String, Value>, outcome: &mut DocumentOutcome) {
        let result = &mut outcome.result;

        require_string(result, obj, "$schema", "");
        if let Some(version) = require_string(result, obj, "specVersion", "") {
            check_spec_version(result, version);
        }

        if let Some(host) = require_object(result, obj, "host", "") {
            require_string(result, host, "name", "/host");
            optional_string(result, host, "id", "/host");
            optional_string(result, host, "documentationUrl", "/host");
            optional_string(result, host, "logoUrl", "/host");
        }

        if let Some(agents) = require_array(result, obj, "agents", "") {
            for (i, entry) in agents.iter().enumerate() {
                let base = format!("/agents/{i}");
                match entry.as_object() {
                    Some(entry_obj) => {
                        require_nonempty_string(result, entry_obj, "id", &base);
                        require_string(result, entry_obj, "name", &base);
                        require_string(result, entry_obj, "description", &base);
                        require_string(result, entry_obj, "cardUrl", &base);
                        require_string(result, entry_obj, "updatedAt", &base);
                        optional_string_array(result, entry_obj, "tags", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("agents entries must be objects, got {}", type_name(entry)),
                    ),
                }
            }
        }
    }
}

/// Check a publisher/trust identity, tolerating the legacy flattened `id`
/// string with a warning.
fn validate_identity_block(result: &mut ValidationResult, block: &Map<String, Value>, base: &str) {
    if let Some(identity) = block.get("identity") {
        match identity.as_object() {
            Some(identity_obj) => {
                let ident_base = format!("{base}/identity");
                require_string(result, identity_obj, "type", &ident_base);
                require_nonempty_string(result, identity_obj, "id", &ident_base);
            }
            None => result.schema_error(
                format!("{base}/identity"),
                format!("\"identity\" must be an object, got {}", type_name(identity)),
            ),
        }
        return;
    }

    match block.get("id") {
        Some(Value::String(_)) => result.schema_warning(
            format!("{base}/id"),
            "legacy flattened identity id; prefer a nested \"identity\" object",
        ),
        Some(other) => result.schema_error(
            format!("{base}/id"),
            format!("\"id\" must be a string, got {}", type_name(other)),
        ),
        None => result.schema_error(
            format!("{base}/identity"),
            "\"identity\" is a required property",
        ),
    }
}

/// Require a string field that is also non-empty.
fn require_nonempty_string(
    result: &mut ValidationResult,
    obj: &Map<String, Value>,
    key: &str,
    base: &str,
) {
    if let Some(s) = require_string(result, obj, key, base) {
        if s.is_empty() {
            result.schema_error(format!("{base}/{key}"), format!("\"{key}\" must be non-empty"));
        }
    }
}

/// Accept any `specVersion` whose major component is recognized; flag
/// other majors as `warning: unsupported-version` instead of rejecting.
fn check_spec_version(result: &mut ValidationResult, version: &str) {
    let major = version.split('.').next().and_then(|m| m.parse::<u64>().ok());
    match major {
        None => result.schema_error(
            "/specVersion",
            format!("\"specVersion\" must be a semantic version, got \"{version}\""),
        ),
        Some(m) if m != SUPPORTED_MAJOR => result.schema_warning(
            "/specVersion",
            format!("unsupported-version: major {m} is not recognized by this validator"),
        ),
        Some(_) => {}
    }
}

/// Check the canonical `endpoints` list, tolerating the legacy singular
/// `endpoint` URL with a warning.
fn validate_endpoints(result: &mut ValidationResult, svc: &Map<String, Value>, path: &str) {
    match svc.get("endpoints") {
        Some(Value::Array(endpoints)) => {
            for (i, ep) in endpoints.iter().enumerate() {
                let base = format!("{path}/endpoints/{i}");
                match ep.as_object() {
                    Some(ep_obj) => {
                        require_string(result, ep_obj, "url", &base);
                        optional_string(result, ep_obj, "transport", &base);
                    }
                    None => result.schema_error(
                        base,
                        format!("endpoint entries must be objects, got {}", type_name(ep)),
                    ),
                }
            }
            return;
        }
        Some(other) => {
            result.schema_error(
                format!("{path}/endpoints"),
                format!("\"endpoints\" must be an array, got {}", type_name(other)),
            );
            return;
        }
        None => {}
    }

    match svc.get("endpoint") {
        Some(Value::String(_)) => result.schema_warning(
            format!("{path}/endpoint"),
            "legacy singular \"endpoint\"; prefer an \"endpoints\" list",
        ),
        Some(other) => result.schema_error(
            format!("{path}/endpoint"),
            format!("\"endpoint\" must be a string, got {}", type_name(other)),
        ),
        None => result.schema_error(
            format!("{path}/endpoints"),
            "\"endpoints\" is a required property",
        ),
    }
}
