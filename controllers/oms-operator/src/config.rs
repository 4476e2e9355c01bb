//! Controller configuration.
//!
//! All settings come from environment variables and are read once at startup.

use crate::error::ControllerError;
use o2ims_client::DEFAULT_BASE_URL;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_ERROR_REQUEUE_SECS: u64 = 10;
const DEFAULT_HEALTH_PROBE_ADDR: &str = "0.0.0.0:8081";

/// Runtime configuration for the OMS Operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address prefixed to every endpoint path (`O2IMS_BASE_URL`)
    pub o2ims_base_url: String,
    /// Namespace to watch, all namespaces when `None` (`WATCH_NAMESPACE`)
    pub namespace: Option<String>,
    /// Probe timeout, none by default (`PROBE_TIMEOUT_SECS`)
    pub probe_timeout: Option<Duration>,
    /// Delay before retrying a failed reconcile (`ERROR_REQUEUE_SECS`)
    pub error_requeue: Duration,
    /// Concurrent reconciliations, 0 for unbounded (`MAX_CONCURRENT_RECONCILES`)
    pub max_concurrent_reconciles: u16,
    /// Listener for `/healthz`, `/readyz` and `/metrics` (`HEALTH_PROBE_ADDR`)
    pub health_probe_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ControllerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ControllerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let o2ims_base_url = get("O2IMS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let namespace = get("WATCH_NAMESPACE");
        let probe_timeout = get("PROBE_TIMEOUT_SECS")
            .map(|v| parse::<u64>("PROBE_TIMEOUT_SECS", &v))
            .transpose()?
            .map(Duration::from_secs);
        let error_requeue = get("ERROR_REQUEUE_SECS")
            .map(|v| parse::<u64>("ERROR_REQUEUE_SECS", &v))
            .transpose()?
            .map_or(Duration::from_secs(DEFAULT_ERROR_REQUEUE_SECS), Duration::from_secs);
        let max_concurrent_reconciles = get("MAX_CONCURRENT_RECONCILES")
            .map(|v| parse::<u16>("MAX_CONCURRENT_RECONCILES", &v))
            .transpose()?
            .unwrap_or(0);
        let health_probe_addr = parse::<SocketAddr>(
            "HEALTH_PROBE_ADDR",
            &get("HEALTH_PROBE_ADDR").unwrap_or_else(|| DEFAULT_HEALTH_PROBE_ADDR.to_string()),
        )?;

        Ok(Self {
            o2ims_base_url,
            namespace,
            probe_timeout,
            error_requeue,
            max_concurrent_reconciles,
            health_probe_addr,
        })
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ControllerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ControllerError::InvalidConfig(format!("{key}={value:?}: {e}")))
}
