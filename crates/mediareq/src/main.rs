//! Mediareq CLI binary.

use anyhow::Result;
use mediareq::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the mediareq CLI.
///
/// Uses tokio's current_thread runtime; every command is a short sequence of
/// file operations.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Example: RUST_LOG=mediareq=debug,mediareq_json=trace mediareq list
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mediareq=info,mediareq_json=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting mediareq CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Mediareq CLI completed successfully");
    Ok(())
}
