//! Ground-truth risk labels for historical rows
//!
//! Uses its own thresholds on raw metrics, separate from the decision
//! policy bands.

use crate::models::{MetricRecord, TrainingRow};

/// CPU percent above which a row is labeled high risk
pub const CPU_LABEL_THRESHOLD: f64 = 75.0;

/// Memory percent above which a row is labeled high risk
pub const MEMORY_LABEL_THRESHOLD: f64 = 75.0;

/// Latency (ms) above which a row is labeled high risk
pub const LATENCY_LABEL_THRESHOLD: f64 = 250.0;

/// 1 if any threshold is strictly exceeded, else 0
pub fn risk_label(metrics: &MetricRecord) -> u8 {
    let high_risk = metrics.cpu_usage > CPU_LABEL_THRESHOLD
        || metrics.memory_usage > MEMORY_LABEL_THRESHOLD
        || metrics.latency > LATENCY_LABEL_THRESHOLD;
    u8::from(high_risk)
}

/// Attach a label to every record
pub fn label_records(records: &[MetricRecord]) -> Vec<TrainingRow> {
    records
        .iter()
        .map(|metrics| TrainingRow {
            metrics: *metrics,
            risk_label: risk_label(metrics),
        })
        .collect()
}
