//! Weighted linear risk scorer

use super::normalizer::normalize;
use super::RiskPredictor;
use crate::error::Result;
use crate::models::{MetricRecord, NormalizedMetrics};

pub const CPU_WEIGHT: f64 = 0.35;
pub const MEMORY_WEIGHT: f64 = 0.30;
pub const LATENCY_WEIGHT: f64 = 0.20;
pub const REQUEST_WEIGHT: f64 = 0.15;

/// Decimal places kept in published risk scores
pub const SCORE_DECIMALS: usize = 2;

/// Weighted sum of normalized metrics, rounded to [`SCORE_DECIMALS`]
pub fn risk_score(normalized: &NormalizedMetrics) -> f64 {
    let raw = CPU_WEIGHT * normalized.cpu
        + MEMORY_WEIGHT * normalized.memory
        + LATENCY_WEIGHT * normalized.latency
        + REQUEST_WEIGHT * normalized.request_rate;
    round_to(raw, SCORE_DECIMALS)
}

/// Round to `decimals` places on the exact binary value.
///
/// Float formatting is exact, so printing with `decimals` digits and parsing
/// back yields the `f64` nearest to the correctly rounded decimal. Plain
/// `(x * 100.0).round() / 100.0` rounds 0.615 up to 0.62.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Scores metrics with the fixed weighted formula
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedScorer;

impl WeightedScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score_metrics(&self, metrics: &MetricRecord) -> f64 {
        risk_score(&normalize(metrics))
    }
}

impl RiskPredictor for WeightedScorer {
    fn score(&self, metrics: &MetricRecord) -> Result<f64> {
        metrics.validate()?;
        Ok(self.score_metrics(metrics))
    }

    fn name(&self) -> &str {
        "weighted"
    }
}
