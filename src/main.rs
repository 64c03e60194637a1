//! Findash main entry point

use anyhow::Context;
use clap::Parser;
use findash_api::start_server;
use findash_client::{HttpTransactionsApi, TransactionsApi};
use findash_config::Config;
use findash_core::TransactionStore;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "findash")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal-finance dashboard over an external transactions API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.clone())
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    log::info!(
        "Config loaded: backend={}, listen={}:{}",
        config.backend.base_url,
        config.server.host,
        config.server.port
    );

    let rt = Runtime::new()?;
    rt.block_on(async {
        let client: Arc<dyn TransactionsApi> = Arc::new(HttpTransactionsApi::new(&config.backend));
        let store = Arc::new(TransactionStore::new());

        // A failed initial fetch is not fatal: the dashboard starts
        // empty until a later /api/refresh succeeds.
        match client.list().await {
            Ok(transactions) => {
                log::info!("Fetched {} transactions from backend", transactions.len());
                store.replace_all(transactions);
            }
            Err(e) => log::warn!("Initial transaction fetch failed: {}", e),
        }

        start_server(config, store, client).await;
    });

    Ok(())
}
