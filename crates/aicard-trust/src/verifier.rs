//! # The Trust State Machine
//!
//! Every card starts unverified and lands in exactly one terminal state:
//!
//! ```text
//! Unverified ──► Unsigned          (no "signature" field)
//!            ──► KeyUnresolvable   (resolver failed, timed out, found nothing)
//!            ──► InvalidSignature  (malformed JWS, or bytes do not verify)
//!            ──► Verified
//! ```
//!
//! A signature over modified content, a signature by the wrong key, and a
//! string that is not a JWS at all are deliberately indistinguishable: all
//! are `InvalidSignature`. Diagnostic detail goes to logs, never to the
//! outcome, so callers cannot branch on *why* verification failed.
//!
//! Verification covers the canonical bytes of the raw document minus the
//! `signature` field — including any unknown fields the typed view
//! dropped — so a tampered future-spec field still breaks the signature.

use serde::Deserialize;
use serde_json::Value;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use aicard_core::error::CanonicalizationError;
use aicard_crypto::{DetachedJws, Ed25519Signature, SigningInput};
use aicard_model::{canonical_card_content, AiCard, Attestation};

use crate::resolver::{
    Ed25519SignatureVerifier, KeyResolver, PublicKeyMaterial, SignatureVerifier,
};

/// Terminal trust state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustOutcome {
    /// The card carries no `signature` field. Not an error — trust is
    /// simply not established.
    Unsigned,
    /// Signed, but no usable key material could be obtained for the
    /// trust identity.
    KeyUnresolvable,
    /// The signature is malformed or does not verify.
    InvalidSignature,
    /// The signature verifies over the canonical card content with the
    /// resolved key.
    Verified,
}

impl TrustOutcome {
    /// True only for [`TrustOutcome::Verified`].
    pub fn is_verified(&self) -> bool {
        matches!(self, TrustOutcome::Verified)
    }
}

/// Verification status of one attestation's strongest source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttestationStatus {
    /// An embedded credential verified against the card's resolved key.
    VerifiedEmbedded,
    /// An embedded credential that is malformed, does not verify, or
    /// cannot be checked because the card's key never resolved.
    InvalidEmbedded,
    /// Only a remote `credentialUrl` or `badgeUrl`; nothing was fetched
    /// or checked here.
    UnverifiedRemote,
    /// No verification source at all (the invariant checker also rejects
    /// this shape).
    MissingSource,
}

/// One attestation's check result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationCheck {
    /// JSON-Pointer path of the attestation in the card.
    pub path: String,
    /// The attestation's declared type.
    pub attestation_type: String,
    /// What verification established.
    pub status: AttestationStatus,
}

/// The full trust verdict for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustReport {
    /// Terminal signature state.
    pub outcome: TrustOutcome,
    /// Per-attestation results, publisher attestation first, then
    /// `trust.attestations` in order.
    pub attestations: Vec<AttestationCheck>,
}

/// Runs the trust state machine over cards, generic over how keys are
/// resolved and signatures are checked.
#[derive(Debug, Clone)]
pub struct TrustVerifier<R, V = Ed25519SignatureVerifier> {
    resolver: R,
    verifier: V,
}

impl<R: KeyResolver> TrustVerifier<R> {
    /// A verifier for the standard `EdDSA` detached-JWS profile.
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            verifier: Ed25519SignatureVerifier,
        }
    }
}

impl<R: KeyResolver, V: SignatureVerifier> TrustVerifier<R, V> {
    /// A verifier with a custom signature algorithm implementation.
    pub fn with_verifier(resolver: R, verifier: V) -> Self {
        Self { resolver, verifier }
    }

    /// Run the state machine over one card.
    ///
    /// `raw` must be the parsed document the card was deserialized from;
    /// signing covers its bytes, not the typed view's.
    ///
    /// # Errors
    ///
    /// Only canonicalization failure is a hard error. Every signature
    /// or resolution problem is a terminal outcome in the report.
    pub fn verify_card(
        &self,
        raw: &Value,
        card: &AiCard,
    ) -> Result<TrustReport, CanonicalizationError> {
        let key = match self.resolver.resolve(&card.trust.identity) {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::debug!(identity = %card.trust.identity.id, error = %e, "key resolution failed");
                None
            }
        };

        let outcome = match &card.signature {
            None => TrustOutcome::Unsigned,
            Some(signature) => match &key {
                None => TrustOutcome::KeyUnresolvable,
                Some(key) => self.check_signature(raw, signature, key)?,
            },
        };

        let mut attestations = Vec::new();
        if let Some(att) = &card.publisher.attestation {
            attestations.push(self.check_attestation("/publisher/attestation", att, key.as_ref()));
        }
        if let Some(list) = &card.trust.attestations {
            for (i, att) in list.iter().enumerate() {
                attestations.push(self.check_attestation(
                    &format!("/trust/attestations/{i}"),
                    att,
                    key.as_ref(),
                ));
            }
        }

        Ok(TrustReport { outcome, attestations })
    }

    fn check_signature(
        &self,
        raw: &Value,
        signature: &str,
        key: &PublicKeyMaterial,
    ) -> Result<TrustOutcome, CanonicalizationError> {
        let jws = match DetachedJws::parse(signature) {
            Ok(jws) => jws,
            Err(e) => {
                tracing::debug!(error = %e, "signature field is not a detached JWS");
                return Ok(TrustOutcome::InvalidSignature);
            }
        };
        let content = canonical_card_content(raw)?;
        let input = jws.signing_input(&content);
        if self.verifier.verify(&input, jws.signature(), key) {
            Ok(TrustOutcome::Verified)
        } else {
            Ok(TrustOutcome::InvalidSignature)
        }
    }

    /// Classify one attestation by its strongest verification source.
    ///
    /// Embedded credential value beats remote URL beats badge; only the
    /// embedded form is actually verified (against the card's own key —
    /// the issuer and the card identity are the same party).
    fn check_attestation(
        &self,
        path: &str,
        attestation: &Attestation,
        key: Option<&PublicKeyMaterial>,
    ) -> AttestationCheck {
        let status = if let Some(value) = &attestation.credential_value {
            let verified =
                key.is_some_and(|key| self.verify_embedded_credential(value, key));
            if verified {
                AttestationStatus::VerifiedEmbedded
            } else {
                AttestationStatus::InvalidEmbedded
            }
        } else if attestation.credential_url.is_some() || attestation.badge_url.is_some() {
            AttestationStatus::UnverifiedRemote
        } else {
            AttestationStatus::MissingSource
        };
        AttestationCheck {
            path: path.to_string(),
            attestation_type: attestation.attestation_type.clone(),
            status,
        }
    }

    /// Verify an embedded credential: a standard attached compact JWS
    /// (`header.payload.signature`, all base64url).
    fn verify_embedded_credential(&self, compact: &str, key: &PublicKeyMaterial) -> bool {
        let mut parts = compact.split('.');
        let (Some(protected_b64), Some(payload_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if protected_b64.is_empty() || payload_b64.is_empty() {
            return false;
        }
        let Ok(header_bytes) = URL_SAFE_NO_PAD.decode(protected_b64) else {
            return false;
        };
        let Ok(header) = serde_json::from_slice::<AttachedHeader>(&header_bytes) else {
            return false;
        };
        if header.alg != "EdDSA" {
            return false;
        }
        let Ok(signature) = Ed25519Signature::from_base64url(sig_b64) else {
            return false;
        };
        let input = SigningInput::attached(protected_b64, payload_b64);
        self.verifier.verify(&input, &signature, key)
    }
}

/// Header fields checked on an embedded credential.
#[derive(Debug, Deserialize)]
struct AttachedHeader {
    alg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticKeyResolver;
    use crate::sign::sign_card;
    use aicard_crypto::Ed25519KeyPair;

    fn raw_card(id: &str) -> Value {
        serde_json::json!({
            "$schema": "https://ai-agent-protocol.org/ai-card/v1/schema.json",
            "specVersion": "1.0.0",
            "id": id,
            "name": "Travel Agent",
            "description": "Books trips.",
            "publisher": {
                "identity": {"type": "did", "id": "did:web:example.com"},
                "name": "Example Corp"
            },
            "trust": {
                "identity": {"type": "did", "id": id}
            },
            "services": [{
                "type": "a2a",
                "name": "Travel A2A",
                "endpoints": [{"url": "https://api.example.com/a2a"}],
                "protocolSpecific": {"protocolVersion": "0.3.0", "skills": []}
            }],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-06-01T00:00:00Z"
        })
    }

    const AGENT: &str = "did:web:example.com:agents:travel";

    fn typed(raw: &Value) -> AiCard {
        serde_json::from_value(raw.clone()).unwrap()
    }

    fn verifier_for(kp: &Ed25519KeyPair) -> TrustVerifier<StaticKeyResolver> {
        TrustVerifier::new(
            StaticKeyResolver::new().with_key(AGENT, PublicKeyMaterial::ed25519(kp.public_key())),
        )
    }

    #[test]
    fn test_unsigned_card() {
        let raw = raw_card(AGENT);
        let report = verifier_for(&Ed25519KeyPair::generate())
            .verify_card(&raw, &typed(&raw))
            .unwrap();
        assert_eq!(report.outcome, TrustOutcome::Unsigned);
        assert!(!report.outcome.is_verified());
    }

    #[test]
    fn test_sign_then_verify() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        sign_card(&mut raw, &kp).unwrap();
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::Verified);
    }

    #[test]
    fn test_tampered_content_invalidates() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        sign_card(&mut raw, &kp).unwrap();
        raw["description"] = serde_json::json!("Books trips. Now with hidden fees.");
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::InvalidSignature);
    }

    #[test]
    fn test_tampered_unknown_field_invalidates() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["futureField"] = serde_json::json!("covered");
        sign_card(&mut raw, &kp).unwrap();
        raw["futureField"] = serde_json::json!("tampered");
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::InvalidSignature);
    }

    #[test]
    fn test_wrong_key_invalidates() {
        let signer = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        sign_card(&mut raw, &signer).unwrap();
        // Resolver hands back a different identity's key.
        let report = verifier_for(&Ed25519KeyPair::generate())
            .verify_card(&raw, &typed(&raw))
            .unwrap();
        assert_eq!(report.outcome, TrustOutcome::InvalidSignature);
    }

    #[test]
    fn test_unresolvable_key() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        sign_card(&mut raw, &kp).unwrap();
        let verifier = TrustVerifier::new(StaticKeyResolver::new());
        let report = verifier.verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::KeyUnresolvable);
    }

    #[test]
    fn test_garbage_signature_is_invalid_not_error() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["signature"] = serde_json::json!("definitely not a JWS");
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::InvalidSignature);
    }

    fn embedded_credential(kp: &Ed25519KeyPair) -> String {
        let protected = URL_SAFE_NO_PAD.encode(r#"{"alg":"EdDSA"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"claim":"SOC2 audit passed"}"#);
        let input = SigningInput::attached(&protected, &payload);
        let sig = kp.sign(&input).to_base64url();
        format!("{protected}.{payload}.{sig}")
    }

    #[test]
    fn test_embedded_credential_verified() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["trust"]["attestations"] = serde_json::json!([{
            "type": "SOC2",
            "credentialValue": embedded_credential(&kp)
        }]);
        sign_card(&mut raw, &kp).unwrap();
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.outcome, TrustOutcome::Verified);
        assert_eq!(report.attestations.len(), 1);
        assert_eq!(report.attestations[0].status, AttestationStatus::VerifiedEmbedded);
        assert_eq!(report.attestations[0].path, "/trust/attestations/0");
    }

    #[test]
    fn test_embedded_credential_wrong_signer_invalid() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["trust"]["attestations"] = serde_json::json!([{
            "type": "SOC2",
            "credentialValue": embedded_credential(&Ed25519KeyPair::generate())
        }]);
        sign_card(&mut raw, &kp).unwrap();
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.attestations[0].status, AttestationStatus::InvalidEmbedded);
    }

    #[test]
    fn test_remote_and_missing_sources_classified() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["trust"]["attestations"] = serde_json::json!([
            {"type": "SOC2", "credentialUrl": "https://example.com/soc2.jwt"},
            {"type": "HIPAA"}
        ]);
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.attestations[0].status, AttestationStatus::UnverifiedRemote);
        assert_eq!(report.attestations[1].status, AttestationStatus::MissingSource);
    }

    #[test]
    fn test_publisher_attestation_listed_first() {
        let kp = Ed25519KeyPair::generate();
        let mut raw = raw_card(AGENT);
        raw["publisher"]["attestation"] = serde_json::json!({
            "type": "PublisherIdentity",
            "badgeUrl": "https://example.com/badge.png"
        });
        raw["trust"]["attestations"] = serde_json::json!([{"type": "HIPAA"}]);
        let report = verifier_for(&kp).verify_card(&raw, &typed(&raw)).unwrap();
        assert_eq!(report.attestations[0].path, "/publisher/attestation");
        assert_eq!(report.attestations[1].path, "/trust/attestations/0");
    }
}
