//! # Identity Types
//!
//! Newtype for agent identifiers and the verifiable `Identity` object shared
//! by publishers and the card trust block.
//!
//! Identities are copied by value, never shared by reference — equality is
//! value comparison, which is exactly what the identity-binding invariant
//! (`card.id == trust.identity.id`) needs.

use serde::{Deserialize, Serialize};

/// A globally unique agent identifier, e.g. a DID.
///
/// Kept opaque: the engine compares these by value and never interprets the
/// method. A newtype rather than a bare `String` so an agent id cannot be
/// confused with an arbitrary name or URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A verifiable identity for an agent or publisher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    /// The identity scheme (e.g., `"did"`, `"spiffe"`). Open set.
    #[serde(rename = "type")]
    pub scheme: String,
    /// The identity string itself.
    pub id: String,
}

impl Identity {
    /// Infer the identity scheme from the identifier string.
    ///
    /// Used by the normalization shim when a legacy document carries a
    /// flattened `id` string with no scheme tag.
    pub fn inferred(id: &str) -> Self {
        let scheme = if id.starts_with("did:") {
            "did"
        } else if id.starts_with("spiffe://") {
            "spiffe"
        } else {
            "unknown"
        };
        Self {
            scheme: scheme.to_string(),
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.scheme, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_value_equality() {
        let a = Identity { scheme: "did".into(), id: "did:example:123".into() };
        let b = Identity { scheme: "did".into(), id: "did:example:123".into() };
        assert_eq!(a, b);
    }

    #[test]
    fn test_inferred_did() {
        assert_eq!(Identity::inferred("did:web:example.com").scheme, "did");
    }

    #[test]
    fn test_inferred_spiffe() {
        assert_eq!(Identity::inferred("spiffe://example.com/agent").scheme, "spiffe");
    }

    #[test]
    fn test_inferred_unknown() {
        assert_eq!(Identity::inferred("urn:uuid:1234").scheme, "unknown");
    }

    #[test]
    fn test_identity_serde_uses_type_key() {
        let identity = Identity { scheme: "did".into(), id: "did:example:1".into() };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["type"], "did");
        assert_eq!(json["id"], "did:example:1");
    }

    #[test]
    fn test_agent_id_display() {
        let id = AgentId::from("did:example:123");
        assert_eq!(id.to_string(), "did:example:123");
    }
}
