//! # Error Types — Structured Error Hierarchy
//!
//! Defines the hard-failure error types of the AI Card engine. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! Almost nothing in this engine is a hard error. Schema violations and
//! invariant violations are *collected* into a [`crate::ValidationResult`];
//! trust outcomes travel on their own channel. The enums here cover the
//! remaining cases: input that is not JSON at all, canonicalization failure,
//! and cryptographic failures inside the signing/verification plumbing.

use thiserror::Error;

/// Error loading or parsing a raw document, before any validation runs.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input is not valid JSON. This is the only condition rejected
    /// before validation begins — everything else is a reported outcome.
    #[error("document is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    /// IO error reading a document from disk.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JCS serialization failed.
    #[error("canonical serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// A signature did not verify against the given key and content.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key material could not be parsed or is the wrong length/algorithm.
    #[error("key error: {0}")]
    KeyError(String),

    /// A compact JWS string is structurally malformed.
    #[error("malformed JWS: {0}")]
    MalformedJws(String),

    /// A base64url field failed to decode.
    #[error("base64url decode error: {0}")]
    Decode(String),
}
