//! Main controller implementation.
//!
//! This module contains the `Controller` struct that wires the Kubernetes
//! client, the O2IMS client, the reconciler, the watcher and the health
//! server together.

use crate::config::Config;
use crate::error::ControllerError;
use crate::health::{self, HealthState};
use crate::metrics::Metrics;
use crate::reconciler::Reconciler;
use crate::store::KubeStore;
use crate::watcher::Watcher;
use crds::OmsOperator;
use kube::api::ListParams;
use kube::{Api, Client};
use o2ims_client::O2imsClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// O2IMS client for the configured base URL and timeout.
fn build_o2ims_client(config: &Config) -> Result<O2imsClient, ControllerError> {
    O2imsClient::new(config.o2ims_base_url.clone(), config.probe_timeout).map_err(|e| {
        ControllerError::InvalidConfig(format!("O2IMS_BASE_URL={:?}: {}", config.o2ims_base_url, e))
    })
}

/// Main controller for OmsOperator resources.
pub struct Controller {
    watcher: JoinHandle<Result<(), ControllerError>>,
    health_server: JoinHandle<Result<(), ControllerError>>,
}

impl Controller {
    /// Creates a new controller instance.
    pub async fn new(config: Config) -> Result<Self, ControllerError> {
        info!("Initializing OMS Operator");

        // Create Kubernetes client
        let kube_client = Client::try_default().await?;

        // Create O2IMS client
        let o2ims_client = build_o2ims_client(&config)?;

        let api: Api<OmsOperator> = match config.namespace.as_deref() {
            Some(ns) => Api::namespaced(kube_client.clone(), ns),
            None => Api::all(kube_client.clone()),
        };

        let metrics = Arc::new(Metrics::new()?);
        let health_state = HealthState::new(Arc::clone(&metrics));
        let health_server = tokio::spawn(health::serve(config.health_probe_addr, health_state.clone()));

        info!("Checking if OmsOperator CRD is installed");
        if let Err(e) = api.list(&ListParams::default().limit(1)).await {
            error!("OmsOperator CRD is not available: {}", e);
            health_server.abort();
            return Err(ControllerError::Kube(e));
        }
        info!("Confirmed that OmsOperator CRD is installed");
        health_state.set_ready();

        let reconciler = Reconciler::new(
            Box::new(o2ims_client),
            Box::new(KubeStore::new(kube_client)),
            metrics,
        );

        let watcher_instance = Watcher::new(
            Arc::new(reconciler),
            api,
            config.error_requeue,
            config.max_concurrent_reconciles,
        );
        let watcher = tokio::spawn(async move { watcher_instance.watch_oms_operators().await });

        Ok(Self {
            watcher,
            health_server,
        })
    }

    /// Runs the controller until shutdown.
    pub async fn run(mut self) -> Result<(), ControllerError> {
        info!("OMS Operator running");

        tokio::select! {
            result = &mut self.watcher => {
                self.health_server.abort();
                result.map_err(|e| ControllerError::Watch(format!("OmsOperator watcher panicked: {}", e)))??;
            }
            result = &mut self.health_server => {
                self.watcher.abort();
                result.map_err(|e| ControllerError::Watch(format!("Health server panicked: {}", e)))??;
                return Err(ControllerError::Watch("Health server exited unexpectedly".to_string()));
            }
        }

        info!("OMS Operator has been terminated");
        Ok(())
    }
}
