//! # aicard-model — Canonical AI Card & Catalog Document Model
//!
//! Typed representations of the two document shapes the engine consumes:
//!
//! - **AiCard** (`card.rs`): the full per-agent metadata document.
//! - **AiCatalog** (`catalog.rs`): a host-wide index of lightweight entries.
//! - **Service / Endpoint** (`service.rs`): one interaction-protocol
//!   declaration nested in a card, with its opaque `protocolSpecific`
//!   payload.
//! - **Publisher / Trust / Attestation / Identity** (`trustinfo.rs`): the
//!   identity and compliance posture of a card.
//! - **Normalization** (`normalize.rs`): the compatibility shim that turns
//!   tolerated legacy draft shapes into the canonical model, so downstream
//!   components only ever see one shape.
//!
//! ## Design
//!
//! Documents are immutable value objects once validated; every nested
//! object is owned exclusively by its container. Open-ended fields
//! (`metadata`, `authentication`, `protocolSpecific`) are carried as
//! untouched `serde_json::Value` — stored and forwarded, never interpreted.
//! Unknown fields are ignored on deserialization: old readers must accept
//! documents produced by newer writers.

pub mod card;
pub mod catalog;
pub mod identity;
pub mod normalize;
pub mod service;
pub mod trustinfo;

pub use card::{canonical_card_content, AiCard, Maturity};
pub use catalog::{AgentEntry, AiCatalog, HostInfo};
pub use identity::{AgentId, Identity};
pub use normalize::{normalize_card, normalize_catalog};
pub use service::{Endpoint, Service, PROTOCOL_A2A, PROTOCOL_MCP};
pub use trustinfo::{Attestation, Publisher, TrustInfo};
