//! # The AI Catalog Document
//!
//! The lightweight index file a host serves for domain-based discovery
//! (conventionally at `/.well-known/ai-catalog.json`, though the format is
//! transport-agnostic). The engine only validates catalogs handed to it —
//! fetching is a collaborator's job.

use serde::{Deserialize, Serialize};

use crate::identity::AgentId;

/// Basic information about the host of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostInfo {
    /// Human-readable host name (e.g., the company name).
    pub name: String,
    /// A verifiable ID for the host (e.g., a DID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URL to the host's main documentation.
    #[serde(rename = "documentationUrl", skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    /// URL to the host's logo.
    #[serde(rename = "logoUrl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// A lightweight catalog entry pointing at a full AI Card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEntry {
    /// The agent's primary identifier. Must match the `id` of the card
    /// reachable at `card_url`.
    pub id: AgentId,
    /// Human-readable agent name.
    pub name: String,
    /// Short description of the agent.
    pub description: String,
    /// Tags for filtering and discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Absolute URL to the agent's complete card document.
    #[serde(rename = "cardUrl")]
    pub card_url: String,
    /// ISO 8601 timestamp of when the referenced card was last modified.
    /// Crawlers use it to decide whether to re-fetch the full card.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// A host's master agent catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiCatalog {
    /// The schema this catalog adheres to.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// The version of the AI Catalog specification itself.
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    /// Information about the host of the entire catalog.
    pub host: HostInfo,
    /// Lightweight entries for all agents on this host.
    pub agents: Vec<AgentEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog() {
        let json = serde_json::json!({
            "$schema": "https://ai-agent-protocol.org/ai-catalog/v1/schema.json",
            "specVersion": "1.0.0",
            "host": {"name": "Example Corp", "id": "did:web:example.com"},
            "agents": [{
                "id": "did:web:example.com:agents:travel",
                "name": "Travel Agent",
                "description": "Books trips.",
                "cardUrl": "https://example.com/agents/travel/ai-card.json",
                "updatedAt": "2024-06-01T00:00:00Z"
            }]
        });
        let catalog: AiCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(catalog.agents.len(), 1);
        assert_eq!(catalog.host.name, "Example Corp");
    }

    #[test]
    fn test_host_optional_fields() {
        let json = serde_json::json!({"name": "Minimal Host"});
        let host: HostInfo = serde_json::from_value(json).unwrap();
        assert!(host.id.is_none());
        assert!(host.documentation_url.is_none());
    }

    #[test]
    fn test_entry_serde_camel_case() {
        let entry = AgentEntry {
            id: AgentId::from("did:example:1"),
            name: "A".into(),
            description: "B".into(),
            tags: None,
            card_url: "https://example.com/card.json".into(),
            updated_at: "2024-06-01T00:00:00Z".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("cardUrl").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("tags").is_none());
    }
}
