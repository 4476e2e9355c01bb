//! Controller-specific error types.
//!
//! This module defines error types specific to the OMS Operator that are not
//! covered by upstream library errors.

use kube::Error as KubeError;
use o2ims_client::O2imsError;
use thiserror::Error;

/// Errors that can occur in the OMS Operator.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// The O2IMS probe failed before producing a response
    #[error("O2IMS probe failed: {0}")]
    Probe(#[from] O2imsError),

    /// `spec.endPoint` does not index the endpoint table
    #[error("Invalid endpoint index: {0} (expected 0-4)")]
    InvalidEndpoint(i32),

    /// Resource store error not originating from the Kubernetes client
    #[error("Resource store error: {0}")]
    #[allow(dead_code)] // Only raised by non-Kubernetes stores
    Store(String),

    /// Resource object lacks a field the controller relies on
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource watch failed
    #[error("Resource watch failed: {0}")]
    Watch(String),

    /// Metrics registry error
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    /// Health server I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
