//! # Legacy-Shape Normalization
//!
//! The schema drafts disagree on three shapes: a singular `endpoint` URL vs
//! an `endpoints` list, `services` as a map keyed by protocol type vs an
//! array, and a flattened `id` string vs a nested `identity` object on
//! `publisher`/`trust`. All are valid input until the upstream authors
//! resolve the ambiguity; the non-canonical shapes are flagged `warning` by
//! the document validator and rewritten here, so the invariant checker and
//! trust verifier only ever see the canonical model.
//!
//! Normalization never touches signed bytes: signatures are verified
//! against the raw document, and a signed legacy-shaped card verifies as
//! the bytes its author actually signed.

use serde_json::{Map, Value};

use crate::card::AiCard;
use crate::catalog::AiCatalog;
use crate::identity::Identity;

/// Normalize a raw card document and deserialize it into the canonical
/// model.
///
/// Call only after structural validation has passed; a structurally valid
/// document in either canonical or legacy shape always deserializes.
///
/// # Errors
///
/// Returns the serde error if the (normalized) document still does not fit
/// the model — which indicates a gap between validator and model, not bad
/// user input.
pub fn normalize_card(raw: &Value) -> Result<AiCard, serde_json::Error> {
    serde_json::from_value(normalize_card_value(raw))
}

/// Normalize a raw catalog document and deserialize it.
///
/// Catalogs have no legacy shapes today; this exists so both document
/// kinds enter the typed model through the same doorway.
pub fn normalize_catalog(raw: &Value) -> Result<AiCatalog, serde_json::Error> {
    serde_json::from_value(raw.clone())
}

/// Rewrite every tolerated legacy shape in a card document.
fn normalize_card_value(raw: &Value) -> Value {
    let mut doc = raw.clone();
    let Some(obj) = doc.as_object_mut() else {
        return doc;
    };

    if let Some(services) = obj.remove("services") {
        obj.insert("services".to_string(), normalize_services(services));
    }
    for key in ["publisher", "trust"] {
        if let Some(block) = obj.get_mut(key) {
            normalize_identity_block(block);
        }
    }
    doc
}

/// Turn the early-draft services map into the canonical array, backfilling
/// a missing `type` from the map key. Map iteration over `serde_json::Map`
/// is key-ordered, so the resulting array is deterministic.
fn normalize_services(services: Value) -> Value {
    match services {
        Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, mut svc) in map {
                if let Some(svc_obj) = svc.as_object_mut() {
                    if !svc_obj.contains_key("type") {
                        svc_obj.insert("type".to_string(), Value::String(key));
                    }
                    normalize_endpoints(svc_obj);
                }
                entries.push(svc);
            }
            Value::Array(entries)
        }
        Value::Array(mut entries) => {
            for svc in &mut entries {
                if let Some(svc_obj) = svc.as_object_mut() {
                    normalize_endpoints(svc_obj);
                }
            }
            Value::Array(entries)
        }
        other => other,
    }
}

/// Rewrite a singular `endpoint` URL as a one-element `endpoints` list.
/// A service that already carries `endpoints` keeps it; the stray singular
/// field is dropped either way.
fn normalize_endpoints(svc: &mut Map<String, Value>) {
    if let Some(endpoint) = svc.remove("endpoint") {
        if !svc.contains_key("endpoints") {
            if let Value::String(url) = endpoint {
                svc.insert(
                    "endpoints".to_string(),
                    serde_json::json!([{ "url": url }]),
                );
            }
        }
    }
}

/// Rewrite a flattened `id` string on publisher/trust as a nested
/// `identity` object with an inferred scheme.
fn normalize_identity_block(block: &mut Value) {
    let Some(obj) = block.as_object_mut() else {
        return;
    };
    if obj.contains_key("identity") {
        obj.remove("id");
        return;
    }
    if let Some(Value::String(id)) = obj.remove("id") {
        let identity = Identity::inferred(&id);
        if let Ok(value) = serde_json::to_value(&identity) {
            obj.insert("identity".to_string(), value);
        }
    }
}
