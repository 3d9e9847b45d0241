//! # aicard-trust — Trust Resolution for AI Cards
//!
//! Answers "can this card be trusted?" rather than "is this card well
//! formed?" (that is `aicard-validate`'s job):
//!
//! - **Resolver** (`resolver.rs`): the `KeyResolver` and
//!   `SignatureVerifier` capability seams, plus the built-in Ed25519
//!   verifier and a static in-memory resolver.
//!
//! - **Verifier** (`verifier.rs`): the trust state machine. A card enters
//!   `Unverified` and lands in exactly one terminal state — `Unsigned`,
//!   `KeyUnresolvable`, `InvalidSignature`, or `Verified` — with embedded
//!   attestation credentials checked alongside.
//!
//! - **Sign** (`sign.rs`): the producer side. Canonicalizes a raw card,
//!   signs it, and embeds the detached JWS.
//!
//! ## Security Invariant
//!
//! Verification always runs over the canonical bytes of the *raw*
//! document (minus `signature`), never over a typed struct that may have
//! dropped unknown fields. A failed signature is a terminal verdict, not
//! an error: callers get a [`TrustReport`], and only infrastructure
//! problems (canonicalization of non-JSON content) surface as `Err`.

pub mod resolver;
pub mod sign;
pub mod verifier;

pub use resolver::{
    Ed25519SignatureVerifier, KeyResolveError, KeyResolver, PublicKeyMaterial, SignatureVerifier,
    StaticKeyResolver, ED25519_ALGORITHM,
};
pub use sign::{sign_card, SignError};
pub use verifier::{AttestationCheck, AttestationStatus, TrustOutcome, TrustReport, TrustVerifier};
