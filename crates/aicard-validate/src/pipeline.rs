//! # Validation Pipeline
//!
//! The front door of the engine: raw text in, typed document plus a
//! complete issue list out.
//!
//! Stages run in a fixed order — parse, structural validation, typed
//! normalization, invariant checking — and only the parse stage can fail
//! hard (text that is not JSON cannot be validated at all). A document
//! with structural errors skips the invariant stage: cross-field rules
//! over fields that are missing or mistyped would only duplicate the
//! structural findings.

use serde_json::Value;

use aicard_core::error::DocumentError;
use aicard_core::ValidationResult;
use aicard_model::{normalize_card, normalize_catalog, AiCard, AiCatalog};

use crate::document::{parse_document, DocumentKind, DocumentValidator};
use crate::invariant::{check_card, check_catalog};
use crate::registry::ExtensionRegistry;

/// The full outcome of evaluating one card document.
#[derive(Debug, Clone)]
pub struct CardEvaluation {
    /// The parsed document, exactly as received. Signature verification
    /// must run over this, never over the typed view.
    pub raw: Value,
    /// The typed card, present when structural validation passed.
    pub card: Option<AiCard>,
    /// Structural and invariant issues, in evaluation order.
    pub result: ValidationResult,
}

impl CardEvaluation {
    /// True if the document carries no error-severity issue.
    pub fn valid(&self) -> bool {
        self.result.valid()
    }
}

/// The full outcome of evaluating one catalog document.
#[derive(Debug, Clone)]
pub struct CatalogEvaluation {
    /// The parsed document, exactly as received.
    pub raw: Value,
    /// The typed catalog, present when structural validation passed.
    pub catalog: Option<AiCatalog>,
    /// Structural and invariant issues, in evaluation order.
    pub result: ValidationResult,
}

impl CatalogEvaluation {
    /// True if the document carries no error-severity issue.
    pub fn valid(&self) -> bool {
        self.result.valid()
    }
}

/// Evaluate raw card text through every stage.
///
/// # Errors
///
/// Fails only when `text` is not JSON; every later problem is reported as
/// an issue inside the returned evaluation.
pub fn evaluate_card(
    text: &str,
    registry: &ExtensionRegistry,
) -> Result<CardEvaluation, DocumentError> {
    let raw = parse_document(text)?;
    Ok(evaluate_card_value(raw, registry))
}

/// Evaluate an already-parsed card document.
pub fn evaluate_card_value(raw: Value, registry: &ExtensionRegistry) -> CardEvaluation {
    let validator = DocumentValidator::new(registry.clone());
    let outcome = validator.validate(&raw, DocumentKind::Card);
    let mut result = outcome.result;
    let mut card = None;

    if result.valid() {
        match normalize_card(&raw) {
            Ok(typed) => {
                result.merge(check_card(&typed, &outcome.extension_passed));
                card = Some(typed);
            }
            // Structural validation passed but serde rejected the shape:
            // an engine bug, surfaced as an issue rather than a panic.
            Err(e) => result.schema_error("", format!("document does not deserialize: {e}")),
        }
    }

    CardEvaluation { raw, card, result }
}

/// Evaluate raw catalog text through every stage.
///
/// # Errors
///
/// Fails only when `text` is not JSON.
pub fn evaluate_catalog(
    text: &str,
    registry: &ExtensionRegistry,
) -> Result<CatalogEvaluation, DocumentError> {
    let raw = parse_document(text)?;
    Ok(evaluate_catalog_value(raw, registry))
}

/// Evaluate an already-parsed catalog document.
pub fn evaluate_catalog_value(raw: Value, registry: &ExtensionRegistry) -> CatalogEvaluation {
    let validator = DocumentValidator::new(registry.clone());
    let outcome = validator.validate(&raw, DocumentKind::Catalog);
    let mut result = outcome.result;
    let mut catalog = None;

    if result.valid() {
        match normalize_catalog(&raw) {
            Ok(typed) => {
                result.merge(check_catalog(&typed));
                catalog = Some(typed);
            }
            Err(e) => result.schema_error("", format!("document does not deserialize: {e}")),
        }
    }

    CatalogEvaluation { raw, catalog, result }
}
