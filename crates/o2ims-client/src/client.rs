//! O2IMS API client
//!
//! Issues a single unauthenticated `GET` against one of the fixed inventory
//! endpoints. Any HTTP response, whatever its status code, is a completed
//! probe; only transport failures are errors.

use crate::endpoint::Endpoint;
use crate::error::O2imsError;
use crate::o2ims_trait::O2imsClientTrait;
use reqwest::{Client, StatusCode, Url};
use std::error::Error as StdError;
use std::net::IpAddr;
use std::time::Duration;
use tracing::debug;

/// Outcome of a probe that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// URL that was requested
    pub url: String,
    /// Numeric HTTP status code
    pub status: u16,
    /// Status line without the protocol, e.g. `200 OK`
    pub status_line: String,
    /// Response body as text
    pub body: String,
}

impl ProbeResponse {
    /// Build a response from a status code and body.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let status_line = match StatusCode::from_u16(status) {
            Ok(code) => status_line(code),
            Err(_) => status.to_string(),
        };
        Self {
            url: url.into(),
            status,
            status_line,
            body: body.into(),
        }
    }
}

/// O2IMS API client
#[derive(Debug)]
pub struct O2imsClient {
    client: Client,
    base_url: String,
}

impl O2imsClient {
    /// Create a new O2IMS client
    ///
    /// # Arguments
    /// * `base_url` - O2IMS base URL (e.g., "http://localhost:9000")
    /// * `timeout` - Optional request timeout; `None` waits indefinitely
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, O2imsError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| O2imsError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        // Loopback targets are never sent through an environment proxy.
        if is_loopback(&parsed) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe an endpoint with a plain `GET`.
    ///
    /// A body that cannot be read is reported as empty.
    pub async fn get(&self, endpoint: Endpoint) -> Result<ProbeResponse, O2imsError> {
        let url = endpoint.url(&self.base_url);
        debug!("GET {}", url);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = error_chain(&e);
                return Err(O2imsError::Transport { url, reason });
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("GET {} returned {}", url, status);

        Ok(ProbeResponse {
            url,
            status: status.as_u16(),
            status_line: status_line(status),
            body,
        })
    }
}

#[async_trait::async_trait]
impl O2imsClientTrait for O2imsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: Endpoint) -> Result<ProbeResponse, O2imsError> {
        O2imsClient::get(self, endpoint).await
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_str(), reason),
        None => status.as_str().to_string(),
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
