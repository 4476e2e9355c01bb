//! Prometheus metrics for reconciliations and probes.

use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Outcome label for `oms_operator_reconciliations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Probe answered, `Done` recorded
    Done,
    /// Probe failed, `Done`/`Failed` recorded
    Failed,
    /// Resource already terminal
    Skipped,
    /// Resource no longer exists
    NotFound,
    /// `spec.endPoint` out of range
    InvalidEndpoint,
    /// Any other error
    Error,
}

impl ReconcileOutcome {
    /// Label value for the outcome.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::NotFound => "not_found",
            Self::InvalidEndpoint => "invalid_endpoint",
            Self::Error => "error",
        }
    }
}

/// Metrics registry for the controller.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    reconciliations: IntCounterVec,
    probe_duration: Histogram,
}

impl Metrics {
    /// Create and register all metrics in a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let reconciliations = IntCounterVec::new(
            Opts::new(
                "oms_operator_reconciliations_total",
                "OmsOperator reconciliations by outcome",
            ),
            &["outcome"],
        )?;
        let probe_duration = Histogram::with_opts(HistogramOpts::new(
            "oms_operator_probe_duration_seconds",
            "Duration of O2IMS endpoint probes",
        ))?;

        registry.register(Box::new(reconciliations.clone()))?;
        registry.register(Box::new(probe_duration.clone()))?;

        Ok(Self {
            registry,
            reconciliations,
            probe_duration,
        })
    }

    /// Count one reconciliation with `outcome`.
    pub fn record_reconcile(&self, outcome: ReconcileOutcome) {
        self.reconciliations
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Record the duration of one probe.
    pub fn observe_probe(&self, elapsed: Duration) {
        self.probe_duration.observe(elapsed.as_secs_f64());
    }

    /// Reconciliations recorded so far with `outcome`.
    #[cfg(test)]
    pub fn reconcile_count(&self, outcome: ReconcileOutcome) -> u64 {
        self.reconciliations
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Number of probes observed so far.
    #[cfg(test)]
    pub fn probe_count(&self) -> u64 {
        self.probe_duration.get_sample_count()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = String::new();
        TextEncoder::new().encode_utf8(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}
