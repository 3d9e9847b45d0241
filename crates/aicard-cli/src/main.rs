//! # aicard CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// AI Card toolchain.
///
/// Validates AI Card and AI Catalog documents, generates Ed25519 keys,
/// signs cards, and verifies their trust posture.
#[derive(Parser, Debug)]
#[command(name = "aicard", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a card or catalog document.
    Validate(aicard_cli::validate::ValidateArgs),
    /// Generate an Ed25519 key pair.
    Keygen(aicard_cli::keygen::KeygenArgs),
    /// Sign a card document.
    Sign(aicard_cli::signing::SignArgs),
    /// Verify a card's signature and attestations.
    Verify(aicard_cli::verify::VerifyArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let passed = match cli.command {
        Commands::Validate(args) => aicard_cli::validate::run(&args)?,
        Commands::Keygen(args) => {
            aicard_cli::keygen::run(&args)?;
            true
        }
        Commands::Sign(args) => {
            aicard_cli::signing::run(&args)?;
            true
        }
        Commands::Verify(args) => aicard_cli::verify::run(&args)?,
    };

    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::from(1) })
}
