//! # Validate Subcommand
//!
//! Runs a card or catalog document through the full validation pipeline
//! and prints every issue with its JSON-Pointer path.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};

use aicard_validate::{evaluate_card, evaluate_catalog, ExtensionRegistry};

/// Which document shape to validate.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    /// A per-agent AI Card.
    Card,
    /// A host-wide AI Catalog.
    Catalog,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON document.
    pub path: PathBuf,

    /// Document shape.
    #[arg(long, value_enum, default_value = "card")]
    pub kind: DocKind,

    /// Suppress warnings; print errors only.
    #[arg(long)]
    pub errors_only: bool,
}

/// Validate one document. Returns whether it passed.
pub fn run(args: &ValidateArgs) -> anyhow::Result<bool> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    tracing::debug!(path = %args.path.display(), kind = ?args.kind, "validating document");

    let registry = ExtensionRegistry::default();
    let result = match args.kind {
        DocKind::Card => {
            evaluate_card(&text, &registry)
                .with_context(|| format!("parsing {}", args.path.display()))?
                .result
        }
        DocKind::Catalog => {
            evaluate_catalog(&text, &registry)
                .with_context(|| format!("parsing {}", args.path.display()))?
                .result
        }
    };

    for issue in result.issues() {
        if args.errors_only && issue.severity == aicard_core::Severity::Warning {
            continue;
        }
        println!("{issue}");
    }

    if result.valid() {
        println!(
            "{}: VALID ({} warning(s))",
            args.path.display(),
            result.warning_count()
        );
        Ok(true)
    } else {
        println!(
            "{}: INVALID ({} error(s), {} warning(s))",
            args.path.display(),
            result.error_count(),
            result.warning_count()
        );
        Ok(false)
    }
}
