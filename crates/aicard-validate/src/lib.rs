//! # aicard-validate — Document Validation & Invariant Checking
//!
//! The validation half of the AI Card engine:
//!
//! - **Extension validators** (`extension.rs`, `a2a.rs`, `mcp.rs`): one
//!   validator per protocol discriminator, each enforcing its own
//!   `protocolSpecific` shape. Schemas are additive — unknown fields are
//!   never errors.
//! - **Registry** (`registry.rs`): discriminator → validator mapping,
//!   composed once at startup, immutable thereafter, with a permissive
//!   fallback for unregistered protocol types (open world — unknown tags
//!   are not errors).
//! - **Document validator** (`document.rs`): structural validation of a raw
//!   card or catalog, collecting every issue with a JSON-Pointer path
//!   instead of short-circuiting.
//! - **Invariant checker** (`invariant.rs`): cross-field consistency rules
//!   the type declarations document but cannot enforce.
//! - **Pipeline** (`pipeline.rs`): parse → structural → normalize →
//!   invariants, producing one aggregate outcome.
//!
//! ## Concurrency
//!
//! Everything here is a pure function over an in-memory document. The
//! registry and validators are `Send + Sync`; validating documents (or
//! services within a document) concurrently needs no coordination, and
//! issue order is deterministic regardless.

pub mod a2a;
pub mod document;
pub mod extension;
pub mod invariant;
pub mod mcp;
pub mod pipeline;
pub mod registry;

mod fields;

pub use a2a::A2aValidator;
pub use document::{parse_document, DocumentKind, DocumentOutcome, DocumentValidator};
pub use extension::{ExtensionValidator, PermissiveValidator};
pub use invariant::{check_card, check_catalog, check_entry_against_card};
pub use mcp::McpValidator;
pub use pipeline::{
    evaluate_card, evaluate_card_value, evaluate_catalog, evaluate_catalog_value, CardEvaluation,
    CatalogEvaluation,
};
pub use registry::{ExtensionRegistry, ExtensionRegistryBuilder};
