//! Prometheus metrics for talentsync
//!
//! This module provides metrics tracking for:
//! - Scheduling runs: outcome, duration, candidates scheduled
//! - Notifications: deliveries per channel and outcome
//! - HTTP API: requests per endpoint and status
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If initialization fails, metrics operations become no-ops.

use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec, Encoder,
    HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all scheduling metrics
struct SchedulerMetrics {
    runs: CounterVec,
    run_duration: HistogramVec,
    candidates_scheduled: Counter,
    deliveries: CounterVec,
    api_requests: CounterVec,
    api_duration: HistogramVec,
}

/// Global storage for scheduling metrics
static SCHEDULER_METRICS: OnceLock<SchedulerMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

/// How a scheduling run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Candidates were allocated and notified
    Completed,
    /// The collection held no candidates
    Empty,
    /// The run failed before allocation
    Failed,
}

impl RunOutcome {
    /// Label value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Empty => "empty",
            Self::Failed => "failed",
        }
    }
}

/// Which collection a run targeted
///
/// Collection names arrive in request bodies, so runs are labelled by scope
/// rather than by name to keep the series count fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionScope {
    /// The configured default collection
    Default,
    /// Any collection named by the caller
    Other,
}

impl CollectionScope {
    /// Label value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Other => "other",
        }
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// This function should be called once at application startup.
/// If metric registration fails, errors are logged and subsequent
/// metric operations become no-ops.
///
/// # Example
///
/// ```ignore
/// if let Err(e) = talentsync::metrics::init_metrics() {
///     eprintln!("Warning: Metrics initialization failed: {}", e);
/// }
/// ```
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    // Prevent double initialization
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let metrics = SchedulerMetrics {
        runs: register_counter_vec!(
            "talentsync_runs_total",
            "Total scheduling runs by outcome",
            &["outcome"]
        )?,
        run_duration: register_histogram_vec!(
            "talentsync_run_duration_seconds",
            "Scheduling run duration in seconds, notifications included",
            &["scope"],
            vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 300.0]
        )?,
        candidates_scheduled: register_counter!(
            "talentsync_candidates_scheduled_total",
            "Total candidates assigned an interview slot"
        )?,
        deliveries: register_counter_vec!(
            "talentsync_deliveries_total",
            "Total notification attempts by channel and outcome",
            &["channel", "outcome"]
        )?,
        api_requests: register_counter_vec!(
            "talentsync_api_requests_total",
            "Total API requests by endpoint and status",
            &["endpoint", "status"]
        )?,
        api_duration: register_histogram_vec!(
            "talentsync_api_request_duration_seconds",
            "API request duration in seconds",
            &["endpoint"],
            vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
        )?,
    };

    SCHEDULER_METRICS
        .set(metrics)
        .map_err(|_| "Scheduler metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    SCHEDULER_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record the end of a scheduling run
pub fn record_run(outcome: RunOutcome, scheduled: usize) {
    let Some(m) = SCHEDULER_METRICS.get() else {
        return;
    };

    m.runs.with_label_values(&[outcome.as_str()]).inc();

    if scheduled > 0 {
        m.candidates_scheduled.inc_by(scheduled as f64);
    }
}

/// Record one notification attempt
pub fn record_delivery(channel: &str, delivered: bool) {
    if let Some(m) = SCHEDULER_METRICS.get() {
        let outcome = if delivered { "delivered" } else { "failed" };
        m.deliveries.with_label_values(&[channel, outcome]).inc();
    }
}

/// Record API request
pub fn record_api_request(endpoint: &str, status: u16, duration_secs: f64) {
    let Some(m) = SCHEDULER_METRICS.get() else {
        return;
    };

    let status_str = status.to_string();
    m.api_requests
        .with_label_values(&[endpoint, &status_str])
        .inc();
    m.api_duration
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

/// Histogram timer guard that records duration on drop
pub struct MetricsTimer {
    timer: Option<prometheus::HistogramTimer>,
}

impl MetricsTimer {
    fn new(timer: prometheus::HistogramTimer) -> Self {
        Self { timer: Some(timer) }
    }

    /// Create a no-op timer when metrics are not initialized
    fn noop() -> Self {
        Self { timer: None }
    }
}

impl Drop for MetricsTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop_and_record();
        }
    }
}

/// Start a run timer (returns a timer handle)
pub fn start_run_timer(scope: CollectionScope) -> MetricsTimer {
    match SCHEDULER_METRICS.get() {
        Some(m) => MetricsTimer::new(
            m.run_duration
                .with_label_values(&[scope.as_str()])
                .start_timer(),
        ),
        None => MetricsTimer::noop(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ensure_metrics_initialized() {
        let _ = init_metrics();
    }

    #[test]
    fn test_init_metrics() {
        assert!(init_metrics().is_ok());

        // Second call should also be Ok (idempotent)
        assert!(init_metrics().is_ok());
    }

    #[test]
    fn test_metrics_initialized() {
        ensure_metrics_initialized();
        assert!(metrics_initialized());
    }

    #[test]
    fn test_encode_metrics() {
        ensure_metrics_initialized();
        record_run(RunOutcome::Completed, 3);
        let text = encode_metrics().unwrap();
        assert!(text.contains("talentsync_runs_total"));
        assert!(text.contains("talentsync_candidates_scheduled_total"));
    }

    #[test]
    fn test_delivery_recording() {
        ensure_metrics_initialized();
        record_delivery("smtp", true);
        record_delivery("smtp", false);
        let text = encode_metrics().unwrap();
        assert!(text.contains("talentsync_deliveries_total"));
    }

    #[test]
    fn test_run_timer() {
        ensure_metrics_initialized();
        let _timer = start_run_timer(CollectionScope::Default);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(RunOutcome::Completed.as_str(), "completed");
        assert_eq!(RunOutcome::Empty.as_str(), "empty");
        assert_eq!(RunOutcome::Failed.as_str(), "failed");
        assert_eq!(CollectionScope::Default.as_str(), "default");
        assert_eq!(CollectionScope::Other.as_str(), "other");
    }

    #[test]
    fn test_metrics_noop_without_init() {
        // These should not panic even if called before initialization
        record_run(RunOutcome::Empty, 0);
        record_delivery("test", true);
        record_api_request("/test", 200, 0.001);
        let _timer = start_run_timer(CollectionScope::Other);
    }
}
