//! Integration test: full card and catalog documents through the complete
//! pipeline (parse, structural validation, normalization, invariants).
//!
//! Unit tests inside the crate exercise single stages; these fixtures run
//! realistic documents end to end and pin down the exact paths and counts
//! a caller observes for each class of defect.

use serde_json::{json, Value};

use aicard_core::{IssueKind, Severity};
use aicard_validate::{
    evaluate_card, evaluate_card_value, evaluate_catalog, ExtensionRegistry,
};

fn registry() -> ExtensionRegistry {
    ExtensionRegistry::default()
}

/// A well-formed card with one a2a and one mcp service.
fn full_card() -> Value {
    json!({
        "$schema": "https://ai-agent-protocol.org/ai-card/v1/schema.json",
        "specVersion": "1.0.0",
        "id": "did:web:example.com:agents:concierge",
        "name": "Concierge",
        "description": "Answers questions about the example.com product line.",
        "logoUrl": "https://example.com/concierge.png",
        "tags": ["support", "retail"],
        "publisher": {
            "identity": {"type": "did", "id": "did:web:example.com"},
            "name": "Example Corp",
            "attestation": {
                "type": "PublisherIdentity",
                "credentialUrl": "https://example.com/publisher.jwt"
            }
        },
        "trust": {
            "identity": {"type": "did", "id": "did:web:example.com:agents:concierge"},
            "attestations": [
                {"type": "SOC2", "badgeUrl": "https://example.com/soc2.png"}
            ],
            "privacyPolicyUrl": "https://example.com/privacy"
        },
        "maturity": "stable",
        "services": [
            {
                "type": "a2a",
                "name": "Concierge A2A",
                "endpoints": [
                    {"url": "https://api.example.com/a2a", "transport": "jsonrpc"}
                ],
                "protocolSpecific": {
                    "protocolVersion": "0.3.0",
                    "preferredTransport": "JSONRPC",
                    "skills": [
                        {"name": "answer", "description": "Answers product questions."}
                    ]
                }
            },
            {
                "type": "mcp",
                "name": "Concierge Tools",
                "endpoints": [{"url": "https://api.example.com/mcp"}],
                "protocolSpecific": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {"tools": {}},
                    "tools": [
                        {"name": "lookup_order", "description": "Looks up an order."}
                    ],
                    "prompts": "dynamic",
                    "resources": "dynamic"
                }
            }
        ],
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-06-01T00:00:00Z"
    })
}

#[test]
fn test_full_card_is_valid_with_no_issues() {
    let eval = evaluate_card_value(full_card(), &registry());
    assert!(eval.valid(), "unexpected issues:\n{}", eval.result);
    assert!(eval.result.issues().is_empty());
    let card = eval.card.expect("typed card");
    assert_eq!(card.services.len(), 2);
}

#[test]
fn test_identity_mismatch_yields_exactly_one_violation() {
    let mut card = full_card();
    card["trust"]["identity"]["id"] = json!("did:web:attacker.example");
    let eval = evaluate_card_value(card, &registry());
    assert!(!eval.valid());
    let hits: Vec<_> = eval
        .result
        .issues()
        .iter()
        .filter(|i| i.path == "/trust/identity/id")
        .collect();
    assert_eq!(hits.len(), 1, "issues:\n{}", eval.result);
    assert_eq!(hits[0].kind, IssueKind::Invariant);
}

#[test]
fn test_empty_attestation_is_a_violation() {
    let mut card = full_card();
    card["trust"]["attestations"] = json!([{"type": "HIPAA"}]);
    let eval = evaluate_card_value(card, &registry());
    assert!(!eval.valid());
    assert!(eval
        .result
        .issues()
        .iter()
        .any(|i| i.path == "/trust/attestations/0" && i.kind == IssueKind::Invariant));
}

#[test]
fn test_repeated_evaluation_is_identical() {
    let mut card = full_card();
    card.as_object_mut().unwrap().remove("description");
    card["trust"]["attestations"] = json!([{"type": "SOC2"}]);
    card["services"][1]["protocolSpecific"]["tools"] = json!([{"name": "x"}]);

    let a = evaluate_card_value(card.clone(), &registry());
    let b = evaluate_card_value(card, &registry());
    assert_eq!(a.result, b.result);
}

#[test]
fn test_unknown_service_type_accepted_open_world() {
    let mut card = full_card();
    card["services"] = json!([{
        "type": "foo",
        "name": "Custom Protocol",
        "endpoints": [{"url": "https://api.example.com/foo"}],
        "protocolSpecific": {"anything": {"nested": [1, 2.5, null]}}
    }]);
    let eval = evaluate_card_value(card, &registry());
    assert!(eval.valid(), "unexpected issues:\n{}", eval.result);
}

#[test]
fn test_mcp_dynamic_sentinel_and_missing_description() {
    let mut card = full_card();
    // tools as the "dynamic" sentinel is fine...
    card["services"][1]["protocolSpecific"]["tools"] = json!("dynamic");
    let eval = evaluate_card_value(card.clone(), &registry());
    assert!(eval.valid(), "unexpected issues:\n{}", eval.result);

    // ...a listed tool without a description is not.
    card["services"][1]["protocolSpecific"]["tools"] = json!([{"name": "lookup_order"}]);
    let eval = evaluate_card_value(card, &registry());
    assert!(!eval.valid());
    assert!(eval
        .result
        .issues()
        .iter()
        .any(|i| i.path == "/services/1/protocolSpecific/tools/0/description"));
}

#[test]
fn test_reversed_timestamps_are_a_violation() {
    let mut card = full_card();
    card["createdAt"] = json!("2024-06-01T00:00:00Z");
    card["updatedAt"] = json!("2024-01-01T00:00:00Z");
    let eval = evaluate_card_value(card, &registry());
    assert!(!eval.valid());
    assert!(eval
        .result
        .issues()
        .iter()
        .any(|i| i.path == "/updatedAt" && i.kind == IssueKind::Invariant));
}

#[test]
fn test_legacy_shapes_warn_but_validate() {
    let text = json!({
        "$schema": "https://ai-agent-protocol.org/ai-card/v1/schema.json",
        "specVersion": "1.0.0",
        "id": "did:web:example.com:agents:legacy",
        "name": "Legacy Agent",
        "description": "Published against an early draft.",
        "publisher": {"id": "did:web:example.com", "name": "Example Corp"},
        "trust": {"id": "did:web:example.com:agents:legacy"},
        "services": {
            "a2a": {
                "name": "Legacy A2A",
                "endpoint": "https://api.example.com/a2a",
                "protocolSpecific": {"protocolVersion": "0.2.0", "skills": []}
            }
        },
        "createdAt": "2023-05-01T00:00:00Z",
        "updatedAt": "2023-05-01T00:00:00Z"
    })
    .to_string();

    let eval = evaluate_card(&text, &registry()).unwrap();
    assert!(eval.valid(), "unexpected issues:\n{}", eval.result);
    assert!(eval.result.warning_count() >= 3, "issues:\n{}", eval.result);
    assert!(eval
        .result
        .issues()
        .iter()
        .all(|i| i.severity == Severity::Warning));

    // The typed view is fully canonical: array services, endpoints list,
    // nested identities with inferred schemes.
    let card = eval.card.expect("typed card");
    assert_eq!(card.services.len(), 1);
    assert_eq!(card.services[0].service_type, "a2a");
    assert_eq!(card.services[0].endpoints.len(), 1);
    assert_eq!(card.trust.identity.scheme, "did");
    assert_eq!(card.trust.identity.id, "did:web:example.com:agents:legacy");
}

#[test]
fn test_catalog_duplicate_id_single_violation() {
    let entry = json!({
        "id": "did:web:example.com:agents:concierge",
        "name": "Concierge",
        "description": "Answers questions.",
        "cardUrl": "https://example.com/agents/concierge/ai-card.json",
        "updatedAt": "2024-06-01T00:00:00Z"
    });
    let text = json!({
        "$schema": "https://ai-agent-protocol.org/ai-catalog/v1/schema.json",
        "specVersion": "1.0.0",
        "host": {"name": "Example Corp", "documentationUrl": "https://example.com/docs"},
        "agents": [entry.clone(), entry.clone(), entry]
    })
    .to_string();

    let eval = evaluate_catalog(&text, &registry()).unwrap();
    assert!(!eval.valid());
    assert_eq!(eval.result.error_count(), 1, "issues:\n{}", eval.result);
    assert_eq!(eval.result.issues()[0].path, "/agents/1/id");
}

#[test]
fn test_every_defect_reported_in_one_pass() {
    let mut card = full_card();
    card.as_object_mut().unwrap().remove("name");
    card["services"][0]["protocolSpecific"]
        .as_object_mut()
        .unwrap()
        .remove("protocolVersion");
    card["services"][1].as_object_mut().unwrap().remove("endpoints");

    let eval = evaluate_card_value(card, &registry());
    let paths: Vec<&str> = eval.result.issues().iter().map(|i| i.path.as_str()).collect();
    assert!(paths.contains(&"/name"));
    assert!(paths.contains(&"/services/0/protocolSpecific/protocolVersion"));
    assert!(paths.contains(&"/services/1/endpoints"));
}
