//! O2IMS client errors

use thiserror::Error;

/// Errors that can occur when probing the O2IMS API
#[derive(Debug, Error)]
pub enum O2imsError {
    /// Building the underlying HTTP client failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request never produced an HTTP response
    #[error("Get \"{url}\": {reason}")]
    Transport {
        /// URL that was requested
        url: String,
        /// Error and its sources, flattened
        reason: String,
    },

    /// Endpoint index outside the fixed endpoint table
    #[error("endpoint index {0} is out of range (expected 0-4)")]
    InvalidEndpoint(i32),

    /// Base URL could not be parsed
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
