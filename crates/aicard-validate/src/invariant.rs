//! # Invariant Checker
//!
//! Cross-field consistency rules over typed documents. These run after
//! structural validation: a card that deserialized cleanly can still bind
//! its trust identity to a different agent, carry reversed timestamps, or
//! claim an attestation with nothing to verify.
//!
//! All checks collect into one [`ValidationResult`]; none short-circuits.

use std::collections::{BTreeMap, HashMap, HashSet};

use aicard_core::{Timestamp, ValidationResult};
use aicard_model::{AgentEntry, AiCard, AiCatalog};

/// Check every cross-field invariant of a typed card.
///
/// `extension_passed` is the per-service outcome from structural
/// validation; a reserved protocol type whose payload failed there is
/// flagged here as a consistency violation too (the card claims a protocol
/// it does not actually describe).
pub fn check_card(card: &AiCard, extension_passed: &BTreeMap<usize, bool>) -> ValidationResult {
    let mut result = ValidationResult::new();

    // The trust identity binds the card to one agent; a mismatch means the
    // trust block was copied from (or signed for) a different card.
    if card.trust.identity.id != card.id.as_str() {
        result.invariant_violation(
            "/trust/identity/id",
            format!(
                "trust identity {:?} does not match card id {:?}",
                card.trust.identity.id,
                card.id.as_str()
            ),
        );
    }

    check_timestamps(&mut result, &card.created_at, &card.updated_at);

    if let Some(attestation) = &card.publisher.attestation {
        if !attestation.has_verification_source() {
            result.invariant_violation(
                "/publisher/attestation",
                empty_attestation_message(&attestation.attestation_type),
            );
        }
    }
    if let Some(attestations) = &card.trust.attestations {
        for (i, attestation) in attestations.iter().enumerate() {
            if !attestation.has_verification_source() {
                result.invariant_violation(
                    format!("/trust/attestations/{i}"),
                    empty_attestation_message(&attestation.attestation_type),
                );
            }
        }
    }

    for (i, service) in card.services.iter().enumerate() {
        if service.service_type.is_empty() {
            result.invariant_violation(
                format!("/services/{i}/type"),
                "service type must be non-empty",
            );
        }
        if service.endpoints.is_empty() {
            result.invariant_violation(
                format!("/services/{i}/endpoints"),
                "a service must expose at least one endpoint",
            );
        }
        if service.is_reserved_type() && extension_passed.get(&i) == Some(&false) {
            result.invariant_violation(
                format!("/services/{i}/protocolSpecific"),
                format!(
                    "payload does not satisfy the {:?} protocol schema",
                    service.service_type
                ),
            );
        }
    }

    result
}

/// Check the cross-entry invariants of a typed catalog.
///
/// Exactly one violation is recorded per duplicated agent id, at the second
/// occurrence, regardless of how many times the id repeats.
pub fn check_catalog(catalog: &AiCatalog) -> ValidationResult {
    let mut result = ValidationResult::new();

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for (i, entry) in catalog.agents.iter().enumerate() {
        let id = entry.id.as_str();
        match first_seen.get(id) {
            Some(first) => {
                if reported.insert(id) {
                    result.invariant_violation(
                        format!("/agents/{i}/id"),
                        format!("duplicate agent id {id:?} (first listed at /agents/{first})"),
                    );
                }
            }
            None => {
                first_seen.insert(id, i);
            }
        }

        if let Err(e) = Timestamp::parse(&entry.updated_at) {
            result.invariant_violation(format!("/agents/{i}/updatedAt"), e);
        }
    }

    result
}

/// Check a catalog entry against the card it points to.
///
/// An id mismatch is a violation (the catalog indexes the wrong card); a
/// catalog `updatedAt` older than the card's is only staleness — the
/// catalog lags the card, which replication makes routine.
pub fn check_entry_against_card(
    index: usize,
    entry: &AgentEntry,
    card: &AiCard,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if entry.id != card.id {
        result.invariant_violation(
            format!("/agents/{index}/id"),
            format!(
                "catalog entry id {:?} does not match card id {:?}",
                entry.id.as_str(),
                card.id.as_str()
            ),
        );
    }

    if let (Ok(entry_ts), Ok(card_ts)) = (
        Timestamp::parse(&entry.updated_at),
        Timestamp::parse(&card.updated_at),
    ) {
        if entry_ts < card_ts {
            result.invariant_warning(
                format!("/agents/{index}/updatedAt"),
                format!(
                    "catalog entry ({entry_ts}) is stale; the card was updated at {card_ts}"
                ),
            );
        }
    }

    result
}

fn check_timestamps(result: &mut ValidationResult, created_at: &str, updated_at: &str) {
    let created = Timestamp::parse(created_at);
    let updated = Timestamp::parse(updated_at);
    if let Err(e) = &created {
        result.invariant_violation("/createdAt", e.clone());
    }
    if let Err(e) = &updated {
        result.invariant_violation("/updatedAt", e.clone());
    }
    if let (Ok(created), Ok(updated)) = (created, updated) {
        if updated < created {
            result.invariant_violation(
                "/updatedAt",
                format!("updatedAt ({updated}) precedes createdAt ({created})"),
            );
        }
    }
}

fn empty_attestation_message(attestation_type: &str) -> String {
    format!(
        "attestation {attestation_type:?} carries no verification source \
         (badgeUrl, credentialUrl, or credentialValue)"
    )
}
