//! # Metrics Collection Module
//!
//! Records pipeline metrics through the `metrics` facade and exports them in
//! Prometheus text format at `GET /metrics`.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `review_insight_reviews_submitted_total{sentiment}` - Stored reviews
//! - `review_insight_stage_fallbacks_total{stage}` - Stages that used their fallback
//! - `review_insight_submissions_rejected_total{reason}` - Failed submissions
//!
//! **Histograms:**
//! - `review_insight_stage_duration_seconds{stage}` - Time spent per analysis stage

pub mod handler;

pub use metrics_exporter_prometheus::PrometheusHandle;

use crate::analysis::Stage;
use crate::model::Sentiment;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static GLOBAL_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const REVIEWS_SUBMITTED: &str = "review_insight_reviews_submitted_total";
pub const STAGE_FALLBACKS: &str = "review_insight_stage_fallbacks_total";
pub const SUBMISSIONS_REJECTED: &str = "review_insight_submissions_rejected_total";
pub const STAGE_DURATION: &str = "review_insight_stage_duration_seconds";

/// Owns the Prometheus handle and the service start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Seconds since the service started.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

pub fn record_submission(sentiment: Sentiment) {
    metrics::counter!(REVIEWS_SUBMITTED, "sentiment" => sentiment.as_str()).increment(1);
}

pub fn record_rejection(reason: &'static str) {
    metrics::counter!(SUBMISSIONS_REJECTED, "reason" => reason).increment(1);
}

/// Record one stage run; `fell_back` also bumps the fallback counter.
pub fn record_stage(stage: Stage, elapsed: Duration, fell_back: bool) {
    metrics::histogram!(STAGE_DURATION, "stage" => stage.as_str()).record(elapsed.as_secs_f64());
    if fell_back {
        metrics::counter!(STAGE_FALLBACKS, "stage" => stage.as_str()).increment(1);
    }
}

/// Initialize the Prometheus exporter with stage-duration histogram buckets.
///
/// Buckets cover a fast local fallback (milliseconds) up to the generation
/// client timeout: [0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1, 2.5, 5, 10, 30] seconds.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};

    let duration_buckets = &[
        0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(STAGE_DURATION.to_string()), duration_buckets)?
        .install_recorder()?;

    Ok(handle)
}

/// Handle to the process-wide recorder, installing it on first use.
///
/// If another recorder was installed outside this module, the returned handle
/// belongs to a detached recorder and renders nothing.
pub fn global_handle() -> PrometheusHandle {
    GLOBAL_HANDLE
        .get_or_init(|| {
            setup_metrics().unwrap_or_else(|e| {
                tracing::debug!("Metrics recorder already installed, using detached handle: {}", e);
                metrics_exporter_prometheus::PrometheusBuilder::new()
                    .build_recorder()
                    .handle()
            })
        })
        .clone()
}
