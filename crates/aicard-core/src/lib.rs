//! # aicard-core — Foundational Types for the AI Card Engine
//!
//! This crate is the bedrock of the AI Card validation and trust stack. It
//! defines the primitives every other crate in the workspace builds on; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL signing and digest computation flows
//!    through `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for
//!    signed content. Ever. Two implementations that canonicalize differently
//!    will disagree on every signature, so there is exactly one path.
//!
//! 2. **Collected issues, not thrown errors.** Structural and invariant
//!    problems are `Issue` values aggregated into a `ValidationResult`. A
//!    caller sees every problem from one call. Only malformed input that is
//!    not JSON at all is a hard error.
//!
//! 3. **UTC timestamps.** The `Timestamp` type parses RFC 3339 from the wild
//!    (any offset) and normalizes to UTC for comparison. Timestamps are never
//!    re-serialized into signed bytes — the raw document is what gets signed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aicard-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod result;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, CryptoError, DocumentError};
pub use result::{Issue, IssueKind, Severity, ValidationResult};
pub use temporal::Timestamp;
