//! # aicard-crypto — Signing Primitives for AI Cards
//!
//! Implements the cryptographic plumbing the trust verifier plugs together:
//!
//! - **Ed25519** (`ed25519.rs`): key generation, signing, verification.
//!   Keys and signatures serialize as base64url-no-pad strings (the JWS
//!   alphabet).
//!
//! - **Detached JWS** (`jws.rs`): the `<header>..<signature>` compact form
//!   carried in a card's `signature` field, with the RFC 7797 unencoded
//!   payload option — the payload bytes are the JCS-canonical card content,
//!   never re-encoded.
//!
//! ## Security Invariant
//!
//! Signing input is constructed only by `SigningInput::new()`, which takes
//! `&CanonicalBytes`. You cannot sign raw bytes: every signature in the
//! system covers `protected || '.' || canonical_content`, so any two
//! compliant implementations agree on what was signed.
//!
//! ## Crate Policy
//!
//! - Private keys are never serialized or logged. `Ed25519KeyPair` does not
//!   implement `Serialize` and its `Debug` output is redacted.
//! - Depends only on `aicard-core` internally.

pub mod ed25519;
pub mod jws;

pub use ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use jws::{sign_detached, verify_detached, DetachedJws, SigningInput};
