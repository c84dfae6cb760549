//! Metric normalization for risk scoring
//!
//! Maps raw metrics onto the ranges the weighted scorer expects. CPU and
//! memory are percentages divided by 100 with no clamping, so overcommitted
//! workloads score above 1 on those axes. Latency and request rate are capped
//! at 1. Nothing is floored at 0.

use crate::models::{MetricRecord, NormalizedMetrics};

/// Percent scale for CPU and memory utilisation
pub const PERCENT_SCALE: f64 = 100.0;

/// Latency (ms) at which the latency component saturates
pub const LATENCY_CEILING_MS: f64 = 500.0;

/// Request rate (req/min) at which the request component saturates
pub const REQUEST_RATE_CEILING: f64 = 1000.0;

/// Normalize a raw metrics record
pub fn normalize(metrics: &MetricRecord) -> NormalizedMetrics {
    NormalizedMetrics {
        cpu: metrics.cpu_usage / PERCENT_SCALE,
        memory: metrics.memory_usage / PERCENT_SCALE,
        latency: (metrics.latency / LATENCY_CEILING_MS).min(1.0),
        request_rate: (metrics.request_rate / REQUEST_RATE_CEILING).min(1.0),
    }
}
