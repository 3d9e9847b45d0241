//! # Sign Subcommand
//!
//! Canonicalizes a card document, signs it with a stored key, and embeds
//! the detached JWS. The output preserves every field of the input,
//! including ones this toolchain does not model.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use aicard_trust::sign_card;
use aicard_validate::parse_document;

use crate::keygen::load_keypair;

/// Arguments for the sign subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the card document to sign.
    pub path: PathBuf,

    /// Path to the base64url private seed (from `aicard keygen`).
    #[arg(long)]
    pub key: PathBuf,

    /// Where to write the signed card (defaults to stdout).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Sign one card document.
pub fn run(args: &SignArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let mut raw = parse_document(&text)
        .with_context(|| format!("parsing {}", args.path.display()))?;

    let keypair = load_keypair(&args.key)?;
    sign_card(&mut raw, &keypair)?;

    let output = serde_json::to_string_pretty(&raw)?;
    match &args.out {
        Some(out) => {
            fs::write(out, format!("{output}\n"))
                .with_context(|| format!("writing {}", out.display()))?;
            println!("signed card written to {}", out.display());
        }
        None => println!("{output}"),
    }
    Ok(())
}
