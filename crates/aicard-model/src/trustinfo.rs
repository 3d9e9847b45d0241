//! # Publisher, Trust, and Attestation Types
//!
//! The identity and compliance posture of a card: who published it, which
//! verifiable identity it binds to, and what compliance claims it carries.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// The entity (company or individual) that published an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// A verifiable identity for the publisher.
    pub identity: Identity,
    /// The human-readable name of the publisher.
    pub name: String,
    /// A verifiable credential proving the publisher's identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestation: Option<Attestation>,
}

/// The security, identity, and compliance posture of an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustInfo {
    /// The agent's verifiable identity. Must match the root card `id`.
    pub identity: Identity,
    /// Compliance or other attestations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attestations: Option<Vec<Attestation>>,
    /// URL to the agent's privacy policy.
    #[serde(rename = "privacyPolicyUrl", skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    /// URL to the agent's terms of service.
    #[serde(rename = "termsOfServiceUrl", skip_serializing_if = "Option::is_none")]
    pub terms_of_service_url: Option<String>,
}

/// A single compliance, security, or custom attestation.
///
/// An attestation with none of its three verification sources populated is
/// an empty claim; the invariant checker rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// The attestation type (e.g., `"SOC2"`, `"HIPAA"`, free-form).
    #[serde(rename = "type")]
    pub attestation_type: String,
    /// Low-trust unsigned pointer (e.g., a badge image or report page).
    #[serde(rename = "badgeUrl", skip_serializing_if = "Option::is_none")]
    pub badge_url: Option<String>,
    /// URL to an externally hosted verifiable credential.
    #[serde(rename = "credentialUrl", skip_serializing_if = "Option::is_none")]
    pub credential_url: Option<String>,
    /// The embedded credential itself (e.g., a compact JWS).
    #[serde(rename = "credentialValue", skip_serializing_if = "Option::is_none")]
    pub credential_value: Option<String>,
}

impl Attestation {
    /// True if at least one verification source is populated.
    pub fn has_verification_source(&self) -> bool {
        self.badge_url.is_some() || self.credential_url.is_some() || self.credential_value.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attestation(badge: bool, url: bool, value: bool) -> Attestation {
        Attestation {
            attestation_type: "SOC2".into(),
            badge_url: badge.then(|| "https://example.com/badge.png".into()),
            credential_url: url.then(|| "https://example.com/soc2.jwt".into()),
            credential_value: value.then(|| "eyJ..".into()),
        }
    }

    #[test]
    fn test_empty_attestation_has_no_source() {
        assert!(!attestation(false, false, false).has_verification_source());
    }

    #[test]
    fn test_any_single_source_counts() {
        assert!(attestation(true, false, false).has_verification_source());
        assert!(attestation(false, true, false).has_verification_source());
        assert!(attestation(false, false, true).has_verification_source());
    }

    #[test]
    fn test_url_and_value_may_coexist() {
        // Not mutually exclusive; the embedded value is what gets verified.
        assert!(attestation(false, true, true).has_verification_source());
    }

    #[test]
    fn test_attestation_serde_camel_case() {
        let a = attestation(true, false, false);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["type"], "SOC2");
        assert!(json.get("badgeUrl").is_some());
        assert!(json.get("credentialUrl").is_none());
    }

    #[test]
    fn test_trust_info_deserialize_ignores_unknown_fields() {
        let json = serde_json::json!({
            "identity": {"type": "did", "id": "did:example:1"},
            "newFieldFromFutureSpec": 42
        });
        let trust: TrustInfo = serde_json::from_value(json).unwrap();
        assert_eq!(trust.identity.id, "did:example:1");
    }
}
