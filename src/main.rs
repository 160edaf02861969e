//! Subscription service binary entry point.
//!
//! Loads configuration, connects to storage and serves the REST API until
//! Ctrl+C or SIGTERM.

// Enable the coverage attribute when running with nightly for llvm-cov exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use subscription_service::config::{Config, DEFAULT_LOG_LEVEL};
use subscription_service::server::SubscriptionServer;
use tracing_subscriber::EnvFilter;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    // Config first: it loads `.env`, which may carry LOG_LEVEL.
    let config = Config::from_env();

    let filter = config
        .as_ref()
        .map_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL), Config::env_filter);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("subscription-service starting...");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: database={}, attempts={}, port={}, log_level={}",
        config.database_path,
        config.connect_attempts,
        config.http_port,
        config.log_level
    );

    let server = SubscriptionServer::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("subscription-service shutdown complete");
}
