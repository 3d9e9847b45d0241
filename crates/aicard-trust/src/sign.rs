//! Producer-side signing: canonicalize a raw card and embed the detached
//! JWS in its `signature` field.
//!
//! Signing mutates the raw document rather than a typed card so that
//! fields the typed view does not model are still covered by the
//! signature.

use serde_json::Value;
use thiserror::Error;

use aicard_core::error::CanonicalizationError;
use aicard_crypto::{sign_detached, Ed25519KeyPair};
use aicard_model::canonical_card_content;

/// Error signing a card document.
#[derive(Error, Debug)]
pub enum SignError {
    /// The document is not a JSON object; there is nowhere to embed the
    /// signature.
    #[error("cannot sign: document is not a JSON object")]
    NotAnObject,

    /// Canonical serialization failed.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}

/// Sign a raw card in place.
///
/// Any existing `signature` field is replaced; the signature covers the
/// canonical content with that field removed, so re-signing an already
/// signed card is well defined.
///
/// # Errors
///
/// Fails if the document is not an object or cannot be canonicalized.
pub fn sign_card(raw: &mut Value, keypair: &Ed25519KeyPair) -> Result<(), SignError> {
    if !raw.is_object() {
        return Err(SignError::NotAnObject);
    }
    let content = canonical_card_content(raw)?;
    let jws = sign_detached(keypair, &content);
    if let Some(obj) = raw.as_object_mut() {
        obj.insert("signature".to_string(), Value::String(jws.to_compact()));
    }
    Ok(())
}
