//! # Verify Subcommand
//!
//! Runs the trust state machine over a signed card with a caller-supplied
//! public key standing in for identity resolution. Exit status reflects
//! the terminal outcome: success only for `Verified`.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use aicard_core::sha256_digest;
use aicard_crypto::Ed25519PublicKey;
use aicard_model::{canonical_card_content, normalize_card};
use aicard_trust::{PublicKeyMaterial, StaticKeyResolver, TrustOutcome, TrustVerifier};
use aicard_validate::parse_document;

/// Arguments for the verify subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the signed card document.
    pub path: PathBuf,

    /// Base64url Ed25519 public key for the card's trust identity.
    #[arg(long)]
    pub public_key: String,
}

/// Verify one card. Returns whether trust was established.
pub fn run(args: &VerifyArgs) -> anyhow::Result<bool> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let raw = parse_document(&text)
        .with_context(|| format!("parsing {}", args.path.display()))?;
    let card = normalize_card(&raw)
        .with_context(|| format!("{} is not a card document", args.path.display()))?;

    let public_key = Ed25519PublicKey::from_base64url(&args.public_key)
        .context("decoding --public-key")?;
    let resolver = StaticKeyResolver::new()
        .with_key(card.trust.identity.id.clone(), PublicKeyMaterial::ed25519(public_key));

    tracing::debug!(identity = %card.trust.identity.id, "verifying card signature");
    let report = TrustVerifier::new(resolver).verify_card(&raw, &card)?;

    let digest = sha256_digest(&canonical_card_content(&raw)?);
    println!("content: {digest}");
    println!("trust: {:?}", report.outcome);
    for check in &report.attestations {
        println!("  {} ({}): {:?}", check.path, check.attestation_type, check.status);
    }

    Ok(report.outcome == TrustOutcome::Verified)
}
