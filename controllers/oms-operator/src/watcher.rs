//! Kubernetes resource watcher.
//!
//! Runs a `kube_runtime::Controller` over `OmsOperator` resources and hands
//! each scheduled object to the reconciler by namespaced name. The controller
//! owns queueing, reconnection and requeue timing.

use crate::error::ControllerError;
use crate::reconciler::Reconciler;
use crate::store::ResourceKey;
use crds::OmsOperator;
use futures::StreamExt;
use kube::Api;
use kube_runtime::controller::{Action, Config as ControllerConfig};
use kube_runtime::{Controller, watcher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Context handed to every reconcile call.
pub struct Context {
    reconciler: Arc<Reconciler>,
    error_requeue: Duration,
}

/// Watches OmsOperator resources for changes.
pub struct Watcher {
    context: Arc<Context>,
    api: Api<OmsOperator>,
    concurrency: u16,
}

impl Watcher {
    /// Creates a new watcher instance.
    pub fn new(
        reconciler: Arc<Reconciler>,
        api: Api<OmsOperator>,
        error_requeue: Duration,
        concurrency: u16,
    ) -> Self {
        Self {
            context: Arc::new(Context {
                reconciler,
                error_requeue,
            }),
            api,
            concurrency,
        }
    }

    /// Starts watching OmsOperator resources; returns on shutdown signal.
    pub async fn watch_oms_operators(&self) -> Result<(), ControllerError> {
        info!("Starting OmsOperator watcher");

        let controller_config = ControllerConfig::default().concurrency(self.concurrency);

        Controller::new(self.api.clone(), watcher::Config::default().any_semantic())
            .with_config(controller_config)
            .shutdown_on_signal()
            .run(reconcile, error_policy, Arc::clone(&self.context))
            .for_each(|res| async move {
                match res {
                    Ok((obj, _)) => debug!("Reconciled OmsOperator {}", obj),
                    Err(e) => error!("Controller error for OmsOperator: {}", e),
                }
            })
            .await;

        info!("OmsOperator watcher has been terminated");
        Ok(())
    }
}

async fn reconcile(obj: Arc<OmsOperator>, ctx: Arc<Context>) -> Result<Action, ControllerError> {
    let key = ResourceKey::from_resource(&obj)?;
    ctx.reconciler.reconcile(&key).await
}

fn error_policy(_obj: Arc<OmsOperator>, error: &ControllerError, ctx: Arc<Context>) -> Action {
    requeue_action(error, ctx.error_requeue)
}

/// Requeue decision for a failed reconcile.
///
/// An out-of-range endpoint cannot succeed until the resource is edited, and
/// the edit itself triggers a new reconcile.
fn requeue_action(error: &ControllerError, error_requeue: Duration) -> Action {
    match error {
        ControllerError::InvalidEndpoint(_) => {
            warn!("Not requeueing OmsOperator: {}", error);
            Action::await_change()
        }
        _ => {
            error!("Reconciliation error for OmsOperator: {}", error);
            Action::requeue(error_requeue)
        }
    }
}
