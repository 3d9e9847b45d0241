//! # aicard-cli — AI Card Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — Structural and invariant validation of cards/catalogs
//! - `keygen` — Ed25519 key pair generation
//! - `sign` — Canonicalize and sign a card document
//! - `verify` — Trust verification of a signed card
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to domain crates — no validation or
//!   cryptography is implemented here.
//! - Exit code 0 means valid/verified; 1 means the document failed;
//!   other failures (missing files, bad flags) surface as errors.

pub mod keygen;
pub mod signing;
pub mod validate;
pub mod verify;
