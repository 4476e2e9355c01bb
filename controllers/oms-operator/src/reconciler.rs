//! Reconciliation logic for OmsOperator CRDs.
//!
//! A resource is driven from pending to done exactly once: the endpoint named
//! by `spec.endPoint` is probed with a single `GET` and the outcome is stored
//! as the `Done` condition. A resource that already carries `Done` is never
//! probed again, whether the earlier probe succeeded or failed.

use crate::error::ControllerError;
use crate::metrics::{Metrics, ReconcileOutcome};
use crate::store::{OmsOperatorStore, ResourceKey};
use crds::{Condition, ConditionStatus, DONE_CONDITION, OmsOperator, REASON_DONE, REASON_FAILED, set_condition};
use kube_runtime::controller::Action;
use o2ims_client::{Endpoint, O2imsClientTrait};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Reconciles OmsOperator resources.
pub struct Reconciler {
    pub(crate) o2ims_client: Box<dyn O2imsClientTrait>,
    pub(crate) store: Box<dyn OmsOperatorStore>,
    metrics: Arc<Metrics>,
}

impl Reconciler {
    /// Creates a new reconciler instance.
    pub fn new(
        o2ims_client: Box<dyn O2imsClientTrait>,
        store: Box<dyn OmsOperatorStore>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            o2ims_client,
            store,
            metrics,
        }
    }

    /// Reconciles the OmsOperator identified by `key`.
    ///
    /// This method:
    /// 1. Fetches the resource (a missing resource is not an error)
    /// 2. Returns early if a `Done` condition is already present
    /// 3. Resolves `spec.endPoint` against the endpoint table
    /// 4. Probes the endpoint once
    /// 5. Records `Done` with reason `Done` or `Failed` and persists the status
    ///
    /// A failed probe is recorded and then returned as an error, but the next
    /// attempt stops at step 2, so the failure is permanent.
    #[instrument(skip_all, fields(resource = %key))]
    pub async fn reconcile(&self, key: &ResourceKey) -> Result<Action, ControllerError> {
        info!("Reconciling OmsOperator {}", key);

        let result = self.reconcile_once(key).await;
        let outcome = match &result {
            Ok(outcome) => *outcome,
            Err(ControllerError::Probe(_)) => ReconcileOutcome::Failed,
            Err(ControllerError::InvalidEndpoint(_)) => ReconcileOutcome::InvalidEndpoint,
            Err(_) => ReconcileOutcome::Error,
        };
        self.metrics.record_reconcile(outcome);

        result.map(|_| Action::await_change())
    }

    async fn reconcile_once(&self, key: &ResourceKey) -> Result<ReconcileOutcome, ControllerError> {
        let mut resource = match self.store.get(key).await {
            Ok(Some(resource)) => resource,
            Ok(None) => {
                info!("OmsOperator {} not found, ignoring since object must be deleted", key);
                return Ok(ReconcileOutcome::NotFound);
            }
            Err(e) => {
                error!("Failed to get OmsOperator {}: {}", key, e);
                return Err(e);
            }
        };

        if let Some(done) = resource.done_condition() {
            info!("OmsOperator {} already finished ({})", key, done.reason);
            return Ok(ReconcileOutcome::Skipped);
        }

        let index = resource.spec.end_point;
        let endpoint = Endpoint::try_from(index).map_err(|_| {
            error!("OmsOperator {} has endPoint {} outside the endpoint table", key, index);
            ControllerError::InvalidEndpoint(index)
        })?;
        let url = endpoint.url(self.o2ims_client.base_url());

        let started = Instant::now();
        let probe = self.o2ims_client.get(endpoint).await;
        self.metrics.observe_probe(started.elapsed());

        match probe {
            Ok(response) => {
                info!(status = %response.status_line, body = %response.body, "GET URL: {}", url);
                let message = format!("Done: HTTP {} - {}", response.status_line, response.body);
                self.record_done(key, &mut resource, REASON_DONE, message).await?;
                Ok(ReconcileOutcome::Done)
            }
            Err(e) => {
                error!("Failed to get url {}: {}", url, e);
                let message = format!("Done with error: {e}");
                self.record_done(key, &mut resource, REASON_FAILED, message).await?;
                Err(ControllerError::Probe(e))
            }
        }
    }

    /// Upsert the `Done` condition and persist the status.
    async fn record_done(
        &self,
        key: &ResourceKey,
        resource: &mut OmsOperator,
        reason: &str,
        message: String,
    ) -> Result<(), ControllerError> {
        let condition = Condition::new(DONE_CONDITION, ConditionStatus::True, reason, message)
            .with_observed_generation(resource.metadata.generation);

        let status = resource.status.get_or_insert_with(Default::default);
        set_condition(&mut status.conditions, condition);

        match self.store.update_status(resource).await {
            Ok(_) => {
                info!("Updated OmsOperator {} status: {}", key, reason);
                Ok(())
            }
            Err(e) => {
                error!("Failed to update OmsOperator {} status: {}", key, e);
                Err(e)
            }
        }
    }
}
