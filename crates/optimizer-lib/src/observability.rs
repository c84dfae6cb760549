//! Observability infrastructure for the risk optimizer
//!
//! Provides:
//! - Prometheus metrics (assessment latency, decisions, training runs)
//! - Structured logging with tracing

use crate::handler::InvocationContext;
use crate::models::{MetricRecord, RiskAssessment};
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounter, IntCounterVec, IntGauge, TextEncoder,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05, 0.1,
];

/// Buckets for training run duration (in seconds)
const TRAINING_BUCKETS: &[f64] = &[0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 60.0];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<OptimizerMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct OptimizerMetricsInner {
    assessment_latency_seconds: Histogram,
    assessments_total: IntCounterVec,
    invalid_inputs_total: IntCounter,
    training_duration_seconds: Histogram,
    training_rows: IntGauge,
    artifact_errors_total: IntCounter,
}

impl OptimizerMetricsInner {
    fn new() -> Self {
        Self {
            assessment_latency_seconds: register_histogram!(
                "risk_optimizer_assessment_latency_seconds",
                "Time spent scoring a metrics record and deciding an action",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register assessment_latency_seconds"),

            assessments_total: register_int_counter_vec!(
                "risk_optimizer_assessments_total",
                "Risk assessments produced, by decision and scorer",
                &["decision", "scorer"]
            )
            .expect("Failed to register assessments_total"),

            invalid_inputs_total: register_int_counter!(
                "risk_optimizer_invalid_inputs_total",
                "Inference requests rejected for invalid metrics"
            )
            .expect("Failed to register invalid_inputs_total"),

            training_duration_seconds: register_histogram!(
                "risk_optimizer_training_duration_seconds",
                "Wall time of a full training run including persistence",
                TRAINING_BUCKETS.to_vec()
            )
            .expect("Failed to register training_duration_seconds"),

            training_rows: register_int_gauge!(
                "risk_optimizer_training_rows",
                "Number of labeled rows in the most recent training run"
            )
            .expect("Failed to register training_rows"),

            artifact_errors_total: register_int_counter!(
                "risk_optimizer_artifact_errors_total",
                "Failures writing scaler or model artifacts"
            )
            .expect("Failed to register artifact_errors_total"),
        }
    }
}

/// Optimizer metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct OptimizerMetrics {
    _private: (),
}

impl Default for OptimizerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl OptimizerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(OptimizerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &OptimizerMetricsInner {
        GLOBAL_METRICS.get_or_init(OptimizerMetricsInner::new)
    }

    pub fn observe_assessment_latency(&self, duration_secs: f64) {
        self.inner().assessment_latency_seconds.observe(duration_secs);
    }

    pub fn inc_assessments(&self, assessment: &RiskAssessment, scorer: &str) {
        self.inner()
            .assessments_total
            .with_label_values(&[assessment.decision.key(), scorer])
            .inc();
    }

    pub fn inc_invalid_inputs(&self) {
        self.inner().invalid_inputs_total.inc();
    }

    pub fn observe_training_duration(&self, duration_secs: f64) {
        self.inner().training_duration_seconds.observe(duration_secs);
    }

    pub fn set_training_rows(&self, rows: i64) {
        self.inner().training_rows.set(rows);
    }

    pub fn inc_artifact_errors(&self) {
        self.inner().artifact_errors_total.inc();
    }

    /// Encode every registered metric in the Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Structured logger for optimizer events
///
/// Emits named events with consistent fields for assessments, training
/// runs and artifact handling.
#[derive(Clone)]
pub struct StructuredLogger {
    component: String,
}

impl StructuredLogger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Log a risk assessment
    pub fn log_assessment(
        &self,
        metrics: &MetricRecord,
        assessment: &RiskAssessment,
        scorer: &str,
        context: Option<&InvocationContext>,
    ) {
        let request_id = context.and_then(|c| c.request_id.as_deref());
        let function_name = context.and_then(|c| c.function_name.as_deref());
        info!(
            event = "risk_assessed",
            component = %self.component,
            request_id = request_id.unwrap_or("-"),
            function_name = function_name.unwrap_or("-"),
            scorer = %scorer,
            cpu_usage = metrics.cpu_usage,
            memory_usage = metrics.memory_usage,
            latency = metrics.latency,
            request_rate = metrics.request_rate,
            risk_score = assessment.risk_score,
            decision = %assessment.decision,
            "Risk assessed"
        );
    }

    /// Log fallback to the default sample when no metrics were supplied
    pub fn log_default_metrics(&self, request_id: Option<&str>) {
        info!(
            event = "default_metrics_used",
            component = %self.component,
            request_id = request_id.unwrap_or("-"),
            "No metrics supplied, using sample workload"
        );
    }

    /// Log rejected input
    pub fn log_invalid_input(&self, error: &str, request_id: Option<&str>) {
        warn!(
            event = "invalid_input",
            component = %self.component,
            request_id = request_id.unwrap_or("-"),
            error = %error,
            "Rejected metrics input"
        );
    }

    pub fn log_dataset_loaded(&self, path: &str, rows: usize) {
        info!(
            event = "dataset_loaded",
            component = %self.component,
            path = %path,
            rows = rows,
            "Loaded training dataset"
        );
    }

    pub fn log_labels_generated(&self, rows: usize, positive: usize) {
        info!(
            event = "labels_generated",
            component = %self.component,
            rows = rows,
            positive = positive,
            negative = rows - positive,
            "Generated risk labels"
        );
    }

    pub fn log_model_trained(
        &self,
        rows: usize,
        positive: usize,
        training_accuracy: f64,
        elapsed_secs: f64,
    ) {
        info!(
            event = "model_trained",
            component = %self.component,
            rows = rows,
            positive = positive,
            training_accuracy = training_accuracy,
            elapsed_secs = elapsed_secs,
            "Model training complete"
        );
    }

    /// Log artifact load for model-backed scoring
    pub fn log_artifacts_loaded(&self, dir: &str, success: bool) {
        if success {
            info!(
                event = "artifact_loaded",
                component = %self.component,
                dir = %dir,
                "Loaded scaler and model artifacts"
            );
        } else {
            warn!(
                event = "artifact_load_failed",
                component = %self.component,
                dir = %dir,
                "Failed to load scaler and model artifacts"
            );
        }
    }
}
