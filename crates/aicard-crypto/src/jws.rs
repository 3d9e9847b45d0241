//! # Detached JWS — Compact Serialization with Unencoded Payload
//!
//! A card's `signature` field carries a detached JWS compact serialization:
//! `<base64url protected header>..<base64url signature>`, with the payload
//! segment empty. The payload is the JCS-canonical card content with the
//! `signature` field removed, carried unencoded per RFC 7797 (`"b64":false`).
//!
//! The signing input is therefore:
//!
//! ```text
//! ASCII(BASE64URL(protected)) || '.' || canonical_content_bytes
//! ```
//!
//! ## Security Invariant
//!
//! A detached card `SigningInput` can only be built from a protected-header
//! string plus `&CanonicalBytes`. Combined with the `Ed25519KeyPair::sign`
//! signature, this makes "signed the wrong bytes" unrepresentable. The one
//! other constructor, [`SigningInput::attached`], covers standard attached
//! compact JWS and takes the already-encoded payload segment verbatim.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use aicard_core::error::CryptoError;
use aicard_core::CanonicalBytes;

use crate::ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// The protected header every card signature carries.
///
/// `b64: false` selects the RFC 7797 unencoded-payload option; `crit`
/// makes it mandatory for verifiers to understand.
const PROTECTED_HEADER: &str = r#"{"alg":"EdDSA","b64":false,"crit":["b64"]}"#;

/// The exact byte sequence a JWS signature covers.
///
/// Constructed only from a base64url protected header and canonical payload
/// bytes; the inner buffer is private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningInput(Vec<u8>);

impl SigningInput {
    /// Build the signing input `protected || '.' || payload`.
    pub fn new(protected_b64: &str, payload: &CanonicalBytes) -> Self {
        let mut bytes = Vec::with_capacity(protected_b64.len() + 1 + payload.len());
        bytes.extend_from_slice(protected_b64.as_bytes());
        bytes.push(b'.');
        bytes.extend_from_slice(payload.as_bytes());
        Self(bytes)
    }

    /// Build the signing input of an *attached* compact JWS, where the
    /// payload segment is base64url-encoded in place (`b64: true`).
    ///
    /// Used for embedded attestation credentials; card signatures always
    /// go through [`SigningInput::new`] with canonical bytes.
    pub fn attached(protected_b64: &str, payload_b64: &str) -> Self {
        Self(format!("{protected_b64}.{payload_b64}").into_bytes())
    }

    /// Access the signing input bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Fields of a protected header a verifier must understand.
#[derive(Debug, Deserialize)]
struct ProtectedHeader {
    alg: String,
    #[serde(default = "default_b64")]
    b64: bool,
}

fn default_b64() -> bool {
    true
}

/// A parsed detached JWS: protected header (still base64url) and signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedJws {
    protected_b64: String,
    signature: Ed25519Signature,
}

impl DetachedJws {
    /// Parse the `<protected>..<signature>` compact form.
    ///
    /// The middle (payload) segment must be empty — that is what makes the
    /// signature detached.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::MalformedJws` if the string does not have
    /// exactly three segments with an empty middle, if the header is not
    /// base64url JSON, or if the header declares an algorithm other than
    /// EdDSA or an encoded (non-detached) payload.
    pub fn parse(compact: &str) -> Result<Self, CryptoError> {
        let parts: Vec<&str> = compact.split('.').collect();
        let [protected_b64, payload, signature_b64] = parts.as_slice() else {
            return Err(CryptoError::MalformedJws(format!(
                "expected 3 dot-separated segments, got {}",
                parts.len()
            )));
        };
        if !payload.is_empty() {
            return Err(CryptoError::MalformedJws(
                "payload segment must be empty in a detached JWS".to_string(),
            ));
        }

        let header_bytes = URL_SAFE_NO_PAD
            .decode(protected_b64)
            .map_err(|e| CryptoError::MalformedJws(format!("protected header: {e}")))?;
        let header: ProtectedHeader = serde_json::from_slice(&header_bytes)
            .map_err(|e| CryptoError::MalformedJws(format!("protected header JSON: {e}")))?;
        if header.alg != "EdDSA" {
            return Err(CryptoError::MalformedJws(format!(
                "unsupported algorithm {:?}, expected \"EdDSA\"",
                header.alg
            )));
        }
        if header.b64 {
            return Err(CryptoError::MalformedJws(
                "header must declare \"b64\":false for a detached payload".to_string(),
            ));
        }

        let signature = Ed25519Signature::from_base64url(signature_b64)?;
        Ok(Self {
            protected_b64: (*protected_b64).to_string(),
            signature,
        })
    }

    /// The base64url protected header segment.
    pub fn protected_b64(&self) -> &str {
        &self.protected_b64
    }

    /// The signature.
    pub fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }

    /// Render back to the `<protected>..<signature>` compact form.
    pub fn to_compact(&self) -> String {
        format!("{}..{}", self.protected_b64, self.signature.to_base64url())
    }

    /// Rebuild the signing input for a given canonical payload.
    pub fn signing_input(&self, payload: &CanonicalBytes) -> SigningInput {
        SigningInput::new(&self.protected_b64, payload)
    }
}

impl std::fmt::Display for DetachedJws {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_compact())
    }
}

/// Sign canonical payload bytes, producing a detached JWS.
pub fn sign_detached(keypair: &Ed25519KeyPair, payload: &CanonicalBytes) -> DetachedJws {
    let protected_b64 = URL_SAFE_NO_PAD.encode(PROTECTED_HEADER);
    let input = SigningInput::new(&protected_b64, payload);
    let signature = keypair.sign(&input);
    DetachedJws {
        protected_b64,
        signature,
    }
}

/// Verify a detached JWS over canonical payload bytes.
///
/// Returns `Ok(())` on success; `Err(CryptoError::VerificationFailed)` if
/// the signature does not match the payload and key.
pub fn verify_detached(
    jws: &DetachedJws,
    payload: &CanonicalBytes,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    let input = jws.signing_input(payload);
    verify(&input, jws.signature(), public_key)
}
