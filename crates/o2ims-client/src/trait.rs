//! O2imsClient trait for mocking
//!
//! The reconciler depends on this trait rather than on the concrete client,
//! so tests can substitute [`crate::MockO2imsClient`].

use crate::client::ProbeResponse;
use crate::endpoint::Endpoint;
use crate::error::O2imsError;

/// Trait for O2IMS probe operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait O2imsClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// Issue a single `GET` against `endpoint`
    async fn get(&self, endpoint: Endpoint) -> Result<ProbeResponse, O2imsError>;
}
