//! Mediareq bot binary.
//!
//! Serves interactions as JSON lines over stdio. Logs go to stderr.

use mediareq::commands::init;
use mediareq::id_generation::IdGenerator;
use mediareq::storage::open_storage_lenient;
use mediareq_bot::{BotServer, Dispatcher, LogNotifier};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("mediareq_bot=info,mediareq=info,mediareq_json=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting mediareq-bot");

    let (root, config) = init::discover(&std::env::current_dir()?).await?;
    let backend = config.storage.to_backend(&root)?;
    let storage = open_storage_lenient(backend, IdGenerator::random()).await?;

    let admin = config.admin();
    tracing::info!(admin = %admin, root = %root.display(), "Request store ready");

    let dispatcher = Dispatcher::new(Dispatcher::share(storage), admin, Arc::new(LogNotifier));
    let server = BotServer::new(dispatcher);

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted, shutting down"),
    }

    Ok(())
}
