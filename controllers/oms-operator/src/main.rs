//! OMS Operator
//!
//! Probes the O2IMS infrastructure inventory API on behalf of `OmsOperator`
//! resources.
//!
//! Each resource selects one of five fixed inventory endpoints. The controller
//! issues one `GET` against it and records the HTTP status line and body (or
//! the transport error) as the resource's `Done` condition. Resources that are
//! already `Done` are left alone.

mod config;
mod controller;
mod error;
mod health;
mod metrics;
mod reconciler;
mod store;
mod watcher;

#[cfg(test)]
mod test_utils;

use crate::config::Config;
use crate::error::ControllerError;
use controller::Controller;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting OMS Operator");

    let config = Config::from_env()?;

    info!("Configuration:");
    info!("  O2IMS base URL: {}", config.o2ims_base_url);
    info!("  Namespace: {}", config.namespace.as_deref().unwrap_or("all namespaces"));
    info!(
        "  Probe timeout: {}",
        config
            .probe_timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()))
    );
    info!("  Health probe address: {}", config.health_probe_addr);

    // Initialize and run controller
    let controller = Controller::new(config).await?;
    controller.run().await?;

    Ok(())
}
