//! Hardware Profile Controller
//!
//! Migrates dashboard HardwareProfiles (`dashboard.opendatahub.io`) to
//! infrastructure HardwareProfiles (`infrastructure.opendatahub.io`):
//! - Creates or updates the infrastructure profile with the same name
//! - Marks the dashboard profile with a `migrated-to` annotation
//!
//! Marked profiles are never touched again, so the migration is one-shot
//! per profile and safe to re-run.

mod backoff;
mod config;
mod controller;
mod converter;
mod error;
mod reconciler;
mod watcher;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod watcher_test;

use crate::config::Config;
use crate::error::ControllerError;
use controller::Controller;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    // kube's rustls-tls needs a process-wide crypto provider; a second
    // install only fails if one is already set
    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Hardware Profile Controller");

    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  Domain: {}", config.domain);
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!("  Run once: {}", config.run_once);

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl-C, shutting down");
                cancel.cancel();
            }
        });
    }

    // Initialize and run controller
    let controller = Controller::new(config, cancel).await?;
    controller.run().await?;

    Ok(())
}
