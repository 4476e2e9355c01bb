//! Resource store seam.
//!
//! The reconciler reads `OmsOperator` objects and writes their status through
//! [`OmsOperatorStore`]. [`KubeStore`] backs it with the Kubernetes API; tests
//! use an in-memory implementation.

use crate::error::ControllerError;
use crds::OmsOperator;
use kube::api::{Patch, PatchParams};
use kube::{Api, Client, ResourceExt};
use serde_json::json;
use std::fmt;
use tracing::debug;

/// Namespaced name identifying one managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey {
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    /// Create a key from a namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Key of an existing resource.
    pub fn from_resource(resource: &OmsOperator) -> Result<Self, ControllerError> {
        let name = resource
            .metadata
            .name
            .as_ref()
            .ok_or_else(|| ControllerError::InvalidResource("OmsOperator missing name".to_string()))?;
        let namespace = resource
            .namespace()
            .ok_or_else(|| ControllerError::InvalidResource(format!("OmsOperator {name} missing namespace")))?;
        Ok(Self::new(namespace, name.clone()))
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Read and status-write access to `OmsOperator` resources.
#[async_trait::async_trait]
pub trait OmsOperatorStore: Send + Sync {
    /// Fetch a resource; `Ok(None)` when it does not exist.
    async fn get(&self, key: &ResourceKey) -> Result<Option<OmsOperator>, ControllerError>;

    /// Persist `resource.status`.
    ///
    /// The write is conditional on `resource.metadata.resourceVersion`; a
    /// resource modified since it was read fails with a conflict.
    async fn update_status(&self, resource: &OmsOperator) -> Result<OmsOperator, ControllerError>;
}

/// `OmsOperatorStore` backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    /// Create a store using `client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<OmsOperator> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl OmsOperatorStore for KubeStore {
    async fn get(&self, key: &ResourceKey) -> Result<Option<OmsOperator>, ControllerError> {
        Ok(self.api(&key.namespace).get_opt(&key.name).await?)
    }

    async fn update_status(&self, resource: &OmsOperator) -> Result<OmsOperator, ControllerError> {
        let key = ResourceKey::from_resource(resource)?;
        let status_patch = status_patch(resource);
        debug!("Patching OmsOperator {} status", key);

        let pp = PatchParams::default();
        let updated = self
            .api(&key.namespace)
            .patch_status(&key.name, &pp, &Patch::Merge(&status_patch))
            .await?;
        Ok(updated)
    }
}

/// Merge patch replacing the status, guarded by the resource version.
fn status_patch(resource: &OmsOperator) -> serde_json::Value {
    json!({
        "metadata": {
            "resourceVersion": resource.metadata.resource_version,
        },
        "status": resource.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crds::{Condition, ConditionStatus, OmsOperatorSpec, OmsOperatorStatus};

    fn resource(namespace: Option<&str>) -> OmsOperator {
        let mut resource = OmsOperator::new("probe", OmsOperatorSpec { end_point: 1 });
        resource.metadata.namespace = namespace.map(str::to_string);
        resource.metadata.resource_version = Some("42".to_string());
        resource
    }

    #[test]
    fn test_key_from_resource() {
        let key = ResourceKey::from_resource(&resource(Some("oran"))).unwrap();
        assert_eq!(key, ResourceKey::new("oran", "probe"));
        assert_eq!(key.to_string(), "oran/probe");
    }

    #[test]
    fn test_key_requires_namespace() {
        assert!(matches!(
            ResourceKey::from_resource(&resource(None)),
            Err(ControllerError::InvalidResource(_))
        ));
    }

    #[test]
    fn test_key_requires_name() {
        let mut resource = resource(Some("oran"));
        resource.metadata.name = None;
        assert!(matches!(
            ResourceKey::from_resource(&resource),
            Err(ControllerError::InvalidResource(msg)) if msg.contains("missing name")
        ));
    }

    #[test]
    fn test_status_patch_carries_resource_version() {
        let mut resource = resource(Some("oran"));
        resource.status = Some(OmsOperatorStatus {
            conditions: vec![Condition::new("Done", ConditionStatus::True, "Done", "Done: HTTP 200 OK - {}")],
        });

        let patch = status_patch(&resource);

        assert_eq!(patch["metadata"]["resourceVersion"], "42");
        assert_eq!(patch["status"]["conditions"][0]["type"], "Done");
        assert_eq!(patch["status"]["conditions"][0]["message"], "Done: HTTP 200 OK - {}");
        assert!(patch.get("spec").is_none());
    }
}
