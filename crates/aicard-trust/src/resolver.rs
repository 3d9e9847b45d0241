//! # Key Resolution and Signature Verification Seams
//!
//! Two capability traits decouple the trust state machine from how key
//! material is obtained and how signatures are checked:
//!
//! - [`KeyResolver`] turns a card's trust identity into public key
//!   material. Implementations own their transport and their deadlines;
//!   a resolver that talks to the network maps its timeout to
//!   [`KeyResolveError::Timeout`] instead of blocking the engine.
//!
//! - [`SignatureVerifier`] checks one signature over one signing input.
//!   The built-in [`Ed25519SignatureVerifier`] covers the `EdDSA`
//!   detached-JWS profile; other algorithms plug in at the same seam.

use std::collections::HashMap;

use thiserror::Error;

use aicard_core::error::CryptoError;
use aicard_crypto::{verify, Ed25519PublicKey, Ed25519Signature, SigningInput};
use aicard_model::Identity;

/// Algorithm tag for Ed25519 key material.
pub const ED25519_ALGORITHM: &str = "Ed25519";

/// Public key material returned by a resolver.
///
/// Algorithm-tagged raw bytes rather than a parsed key type, so resolvers
/// for DID documents or JWKS endpoints can hand back whatever the identity
/// publishes; the verifier rejects material it cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    /// Algorithm tag (e.g., [`ED25519_ALGORITHM`]).
    pub algorithm: String,
    /// Raw public key bytes.
    pub bytes: Vec<u8>,
}

impl PublicKeyMaterial {
    /// Wrap an Ed25519 public key.
    pub fn ed25519(key: Ed25519PublicKey) -> Self {
        Self {
            algorithm: ED25519_ALGORITHM.to_string(),
            bytes: key.as_bytes().to_vec(),
        }
    }

    /// Interpret the material as an Ed25519 public key.
    ///
    /// # Errors
    ///
    /// Fails when the algorithm tag or byte length does not match.
    pub fn as_ed25519(&self) -> Result<Ed25519PublicKey, CryptoError> {
        if self.algorithm != ED25519_ALGORITHM {
            return Err(CryptoError::KeyError(format!(
                "expected {ED25519_ALGORITHM} key material, got {:?}",
                self.algorithm
            )));
        }
        let bytes: [u8; 32] = self.bytes.as_slice().try_into().map_err(|_| {
            CryptoError::KeyError(format!(
                "Ed25519 public key must be 32 bytes, got {}",
                self.bytes.len()
            ))
        })?;
        Ok(Ed25519PublicKey::from_bytes(bytes))
    }
}

/// Why key resolution failed. Every variant maps to the same terminal
/// trust outcome (`KeyUnresolvable`); the distinction feeds logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyResolveError {
    /// The identity has no published key material.
    #[error("no key material found for identity {0:?}")]
    NotFound(String),

    /// The resolver's own deadline elapsed.
    #[error("key resolution timed out for identity {0:?}")]
    Timeout(String),

    /// Transport, parsing, or any other resolver failure.
    #[error("key resolution failed: {0}")]
    Failed(String),
}

/// Resolves a trust identity to its published public key material.
pub trait KeyResolver: Send + Sync {
    /// Resolve `identity` to key material.
    fn resolve(&self, identity: &Identity) -> Result<PublicKeyMaterial, KeyResolveError>;
}

/// Verifies one signature over one signing input.
pub trait SignatureVerifier: Send + Sync {
    /// Algorithm this verifier understands (for logs).
    fn algorithm(&self) -> &str;

    /// True if `signature` verifies over `input` with `key`.
    ///
    /// Malformed key material is a `false`, not an error: from the trust
    /// machine's point of view there is no difference between a key that
    /// cannot verify and a key that cannot even be parsed.
    fn verify(
        &self,
        input: &SigningInput,
        signature: &Ed25519Signature,
        key: &PublicKeyMaterial,
    ) -> bool;
}

/// The built-in verifier for the `EdDSA` detached-JWS profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519SignatureVerifier;

impl SignatureVerifier for Ed25519SignatureVerifier {
    fn algorithm(&self) -> &str {
        ED25519_ALGORITHM
    }

    fn verify(
        &self,
        input: &SigningInput,
        signature: &Ed25519Signature,
        key: &PublicKeyMaterial,
    ) -> bool {
        match key.as_ed25519() {
            Ok(pk) => verify(input, signature, &pk).is_ok(),
            Err(e) => {
                tracing::debug!(error = %e, "rejecting unusable key material");
                false
            }
        }
    }
}

/// A resolver over a fixed in-memory identity-to-key table.
///
/// The deployment story for tests, air-gapped verification, and the CLI's
/// `--public-key` flag; production callers implement [`KeyResolver`] over
/// their own DID or JWKS transport.
#[derive(Debug, Clone, Default)]
pub struct StaticKeyResolver {
    keys: HashMap<String, PublicKeyMaterial>,
}

impl StaticKeyResolver {
    /// An empty table; every resolution fails with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add key material for an identity id, replacing any previous entry.
    pub fn with_key(mut self, identity_id: impl Into<String>, key: PublicKeyMaterial) -> Self {
        self.keys.insert(identity_id.into(), key);
        self
    }

    /// Add key material in place.
    pub fn insert(&mut self, identity_id: impl Into<String>, key: PublicKeyMaterial) {
        self.keys.insert(identity_id.into(), key);
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve(&self, identity: &Identity) -> Result<PublicKeyMaterial, KeyResolveError> {
        self.keys
            .get(&identity.id)
            .cloned()
            .ok_or_else(|| KeyResolveError::NotFound(identity.id.clone()))
    }
}
