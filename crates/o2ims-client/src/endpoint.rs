//! Fixed O2IMS endpoint table

use crate::error::O2imsError;
use std::fmt;

/// Base address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// One of the five inventory endpoints, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `api_versions` (index 0)
    ApiVersions,
    /// `v1` (index 1)
    V1,
    /// `v1/api_versions` (index 2)
    V1ApiVersions,
    /// `v1/deploymentManagers` (index 3)
    DeploymentManagers,
    /// `v1/deploymentManagers/id` (index 4)
    DeploymentManager,
}

impl Endpoint {
    /// The endpoint table; position is the index stored on the resource.
    pub const ALL: [Endpoint; 5] = [
        Endpoint::ApiVersions,
        Endpoint::V1,
        Endpoint::V1ApiVersions,
        Endpoint::DeploymentManagers,
        Endpoint::DeploymentManager,
    ];

    /// URL path of the endpoint.
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::ApiVersions => "/o2ims-infrastructureInventory/api_versions",
            Endpoint::V1 => "/o2ims-infrastructureInventory/v1",
            Endpoint::V1ApiVersions => "/o2ims-infrastructureInventory/v1/api_versions",
            Endpoint::DeploymentManagers => "/o2ims-infrastructureInventory/v1/deploymentManagers",
            Endpoint::DeploymentManager => "/o2ims-infrastructureInventory/v1/deploymentManagers/id",
        }
    }

    /// Position of the endpoint in the table.
    pub const fn index(self) -> i32 {
        match self {
            Endpoint::ApiVersions => 0,
            Endpoint::V1 => 1,
            Endpoint::V1ApiVersions => 2,
            Endpoint::DeploymentManagers => 3,
            Endpoint::DeploymentManager => 4,
        }
    }

    /// Full URL of the endpoint under `base_url`.
    pub fn url(self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl TryFrom<i32> for Endpoint {
    type Error = O2imsError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Endpoint::ALL.get(i).copied())
            .ok_or(O2imsError::InvalidEndpoint(index))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
