//! Main HTTP server orchestration.
//!
//! Wires storage, service and router together and serves until a shutdown
//! signal arrives.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::AppError;
use crate::storage::SqliteStorage;

use super::routes::build_router;
use super::types::AppState;

/// HTTP server that owns the process lifecycle.
#[derive(Debug)]
pub struct SubscriptionServer {
    config: Config,
}

impl SubscriptionServer {
    /// Creates a new server with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Bootstraps storage and serves HTTP until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Storage cannot be reached within the configured attempts
    /// - The schema cannot be applied
    /// - The listen address cannot be bound
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> Result<(), AppError> {
        let storage =
            SqliteStorage::bootstrap(&self.config.database_path, self.config.connect_attempts)
                .await?;

        let router = build_router(AppState::from_storage(storage));
        serve(router, self.config.listen_addr()).await
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

/// Serves `router` on `addr` with graceful shutdown.
///
/// # Errors
///
/// Returns [`AppError::Server`] if binding or serving fails.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await.map_err(AppError::Server)?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
