//! Test utilities for reconciler unit tests
//!
//! Provides an in-memory `OmsOperatorStore` and helpers to build test
//! resources and reconcilers.

use crate::error::ControllerError;
use crate::metrics::Metrics;
use crate::reconciler::Reconciler;
use crate::store::{OmsOperatorStore, ResourceKey};
use crds::{Condition, OmsOperator, OmsOperatorSpec, OmsOperatorStatus};
use o2ims_client::MockO2imsClient;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory store mimicking the API server's status subresource.
///
/// Every accepted status write bumps the resource version; a write carrying a
/// stale version is rejected as a conflict.
#[derive(Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<ResourceKey, OmsOperator>>>,
    status_writes: Arc<Mutex<usize>>,
    get_failure: Arc<Mutex<Option<String>>>,
    update_failure: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource, assigning resource version "1" if it has none
    pub fn insert(&self, mut resource: OmsOperator) -> ResourceKey {
        let key = ResourceKey::from_resource(&resource).unwrap();
        resource.metadata.resource_version.get_or_insert_with(|| "1".to_string());
        self.objects.lock().unwrap().insert(key.clone(), resource);
        key
    }

    pub fn fetch(&self, key: &ResourceKey) -> Option<OmsOperator> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    /// Bump the stored resource version, as a concurrent writer would
    pub fn touch(&self, key: &ResourceKey) {
        if let Some(resource) = self.objects.lock().unwrap().get_mut(key) {
            resource.metadata.resource_version = Some(next_version(resource));
        }
    }

    pub fn status_writes(&self) -> usize {
        *self.status_writes.lock().unwrap()
    }

    pub fn fail_get(&self, reason: &str) {
        *self.get_failure.lock().unwrap() = Some(reason.to_string());
    }

    pub fn fail_update(&self, reason: &str) {
        *self.update_failure.lock().unwrap() = Some(reason.to_string());
    }
}

fn next_version(resource: &OmsOperator) -> String {
    let current = resource
        .metadata
        .resource_version
        .as_deref()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    (current + 1).to_string()
}

#[async_trait::async_trait]
impl OmsOperatorStore for MemoryStore {
    async fn get(&self, key: &ResourceKey) -> Result<Option<OmsOperator>, ControllerError> {
        if let Some(reason) = self.get_failure.lock().unwrap().clone() {
            return Err(ControllerError::Store(reason));
        }
        Ok(self.fetch(key))
    }

    async fn update_status(&self, resource: &OmsOperator) -> Result<OmsOperator, ControllerError> {
        if let Some(reason) = self.update_failure.lock().unwrap().clone() {
            return Err(ControllerError::Store(reason));
        }

        let key = ResourceKey::from_resource(resource)?;
        let mut objects = self.objects.lock().unwrap();
        let stored = objects
            .get_mut(&key)
            .ok_or_else(|| ControllerError::Store(format!("omsoperators {key} not found")))?;

        if stored.metadata.resource_version != resource.metadata.resource_version {
            return Err(ControllerError::Store(format!(
                "Operation cannot be fulfilled on omsoperators {key}: the object has been modified"
            )));
        }

        stored.status = resource.status.clone();
        stored.metadata.resource_version = Some(next_version(stored));
        *self.status_writes.lock().unwrap() += 1;
        Ok(stored.clone())
    }
}

/// Create a test OmsOperator in `namespace` probing `end_point`
pub fn create_test_oms_operator(name: &str, namespace: &str, end_point: i32) -> OmsOperator {
    let mut resource = OmsOperator::new(name, OmsOperatorSpec { end_point });
    resource.metadata.namespace = Some(namespace.to_string());
    resource.metadata.generation = Some(1);
    resource
}

/// Attach `conditions` as the resource status
pub fn with_conditions(mut resource: OmsOperator, conditions: Vec<Condition>) -> OmsOperator {
    resource.status = Some(OmsOperatorStatus { conditions });
    resource
}

/// Create a reconciler over the given mock client and store
pub fn create_test_reconciler(client: MockO2imsClient, store: MemoryStore) -> (Reconciler, Arc<Metrics>) {
    let metrics = Arc::new(Metrics::new().unwrap());
    let reconciler = Reconciler::new(Box::new(client), Box::new(store), Arc::clone(&metrics));
    (reconciler, metrics)
}
