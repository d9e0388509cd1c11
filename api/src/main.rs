//! Inventory API Server
//!
//! Creates orders, forwards them to an external supplier and tracks their
//! lifecycle. Uses hexagonal (ports & adapters) architecture so every
//! collaborator can be swapped for a test double.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;
mod transport;

#[cfg(test)]
mod test_utils;


use adapters::{AcmeSupplierClient, InMemoryOrderStorage};
use app::InventoryService;
use config::Config;
use domain::ports::Inventory;
use transport::{HttpTransporter, InventoryTransporter};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<dyn Inventory>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,inventory_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting inventory API...");

    // Load configuration
    let config = Config::from_env()?;

    // Create adapters
    let storage = Arc::new(InMemoryOrderStorage::new());
    let supplier = Arc::new(AcmeSupplierClient::new(config.supplier_url.clone()));
    tracing::info!(supplier_url = %config.supplier_url, "Supplier client configured");

    // Create application service
    let inventory = Arc::new(InventoryService::new(
        storage,
        supplier,
        config.supplier_retry.clone(),
    ));

    let transporter = HttpTransporter::new(inventory);

    // Stop on Ctrl-C
    let shutdown = transporter.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown requested");
                shutdown.shutdown();
            }
            Err(e) => tracing::warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    transporter.serve(listener).await?;

    tracing::info!("Inventory API stopped");
    Ok(())
}
