//! # Keygen Subcommand
//!
//! Generates an Ed25519 key pair. The private seed is written to a file
//! as base64url text; the public key is printed so it can be published
//! alongside the agent's identity.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clap::Args;

use aicard_crypto::Ed25519KeyPair;

/// Arguments for the keygen subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the base64url-encoded private seed.
    #[arg(long)]
    pub secret_out: PathBuf,
}

/// Generate a key pair and persist the seed.
pub fn run(args: &KeygenArgs) -> anyhow::Result<()> {
    let keypair = Ed25519KeyPair::generate();
    let seed_b64 = URL_SAFE_NO_PAD.encode(keypair.seed_bytes());
    fs::write(&args.secret_out, format!("{seed_b64}\n"))
        .with_context(|| format!("writing {}", args.secret_out.display()))?;

    println!("secret key: {}", args.secret_out.display());
    println!("public key: {}", keypair.public_key().to_base64url());
    Ok(())
}

/// Load a key pair from a seed file written by [`run`].
pub(crate) fn load_keypair(path: &PathBuf) -> anyhow::Result<Ed25519KeyPair> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(text.trim())
        .with_context(|| format!("decoding seed in {}", path.display()))?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("seed in {} must be 32 bytes", path.display()))?;
    Ok(Ed25519KeyPair::from_seed(&seed))
}
