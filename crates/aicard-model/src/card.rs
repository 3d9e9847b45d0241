//! # The AI Card Document
//!
//! The full per-agent metadata document: identity, trust posture, and the
//! interaction protocols the agent exposes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use aicard_core::error::CanonicalizationError;
use aicard_core::CanonicalBytes;

use crate::identity::AgentId;
use crate::service::Service;
use crate::trustinfo::{Publisher, TrustInfo};

/// The agent's lifecycle stage. Registries use it to filter out
/// experimental or deprecated agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    /// Experimental; interface may change without notice.
    Preview,
    /// Production-ready.
    Stable,
    /// Scheduled for removal; registries should hide it by default.
    Deprecated,
    /// A stage introduced by a newer spec revision. Tolerated, flagged by
    /// the document validator.
    #[serde(other)]
    Unknown,
}

/// The unified AI Card document for a single agent.
///
/// Immutable once validated: every "update" is a new document with a new
/// `updatedAt`. Unknown fields from newer spec revisions are ignored on
/// read and therefore dropped on rewrite — which is why signatures are
/// verified against the raw document bytes, never against this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiCard {
    /// The schema this card adheres to,
    /// e.g. `https://ai-agent-protocol.org/ai-card/v1/schema.json`.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// The version of the AI Card specification itself (semantic version).
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    /// Globally unique agent identifier. Verifiable formats (DIDs) are
    /// recommended; must match `trust.identity.id`.
    pub id: AgentId,
    /// Human-readable agent name.
    pub name: String,
    /// Short description of the agent's purpose.
    pub description: String,
    /// URL to the agent's logo. Data URLs recommended for high-security
    /// environments (no dereference, no tracking).
    #[serde(rename = "logoUrl", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Keywords to aid discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// The entity that published this agent.
    pub publisher: Publisher,
    /// Trust, compliance, and identity information.
    pub trust: TrustInfo,
    /// Lifecycle stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<Maturity>,
    /// The interaction protocols this agent exposes.
    pub services: Vec<Service>,
    /// ISO 8601 timestamp of first publication. Kept as the raw string:
    /// parsing happens in the invariant checker, and the signed bytes must
    /// not be rewritten.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// ISO 8601 timestamp of the last modification to the entire card.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    /// Detached JWS compact serialization (`<header>..<signature>`) over
    /// the canonical content of this card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Open black box for non-standard metadata. Stored, never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

/// Canonicalize a raw card document for signing or verification.
///
/// The `signature` field itself is excluded — it cannot cover its own
/// bytes. Everything else, including unknown fields a newer spec revision
/// added, is covered; this is why canonicalization operates on the raw
/// `Value` rather than on the typed [`AiCard`].
pub fn canonical_card_content(raw: &Value) -> Result<CanonicalBytes, CanonicalizationError> {
    let mut content = raw.clone();
    if let Some(obj) = content.as_object_mut() {
        obj.remove("signature");
    }
    CanonicalBytes::new(&content)
}
