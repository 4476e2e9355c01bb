//! Mock O2imsClient for unit testing
//!
//! Stores canned responses per endpoint in memory and records every probe so
//! tests can assert how many requests a reconcile issued.

use crate::client::ProbeResponse;
use crate::endpoint::Endpoint;
use crate::error::O2imsError;
use crate::o2ims_trait::O2imsClientTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum CannedResponse {
    Response { status: u16, body: String },
    TransportFailure(String),
}

/// Mock O2imsClient for testing
///
/// Endpoints without a canned response fail with a connection-refused
/// transport error, the way an unreachable server would.
#[derive(Debug, Clone)]
pub struct MockO2imsClient {
    base_url: String,
    responses: Arc<Mutex<HashMap<Endpoint, CannedResponse>>>,
    calls: Arc<Mutex<Vec<Endpoint>>>,
}

impl MockO2imsClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `endpoint` with `status` and `body`
    pub fn set_response(&self, endpoint: Endpoint, status: u16, body: impl Into<String>) {
        self.responses.lock().unwrap().insert(
            endpoint,
            CannedResponse::Response {
                status,
                body: body.into(),
            },
        );
    }

    /// Fail `endpoint` at the transport level with `reason`
    pub fn set_transport_failure(&self, endpoint: Endpoint, reason: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint, CannedResponse::TransportFailure(reason.into()));
    }

    /// Endpoints probed so far, in call order
    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of probes issued so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl O2imsClientTrait for MockO2imsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: Endpoint) -> Result<ProbeResponse, O2imsError> {
        self.calls.lock().unwrap().push(endpoint);

        let url = endpoint.url(&self.base_url);
        let canned = self.responses.lock().unwrap().get(&endpoint).cloned();

        match canned {
            Some(CannedResponse::Response { status, body }) => Ok(ProbeResponse::new(url, status, body)),
            Some(CannedResponse::TransportFailure(reason)) => Err(O2imsError::Transport { url, reason }),
            None => Err(O2imsError::Transport {
                url,
                reason: "dial tcp: connect: connection refused".to_string(),
            }),
        }
    }
}
