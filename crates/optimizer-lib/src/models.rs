//! Core data models for the risk optimizer

use crate::error::{OptimizerError, Result};
use crate::predictor::Decision;
use serde::{Deserialize, Serialize};

/// Number of input features shared by the scorer, scaler and model
pub const NUM_FEATURES: usize = 4;

/// Feature column names, in feature-vector order
pub const FEATURE_NAMES: [&str; NUM_FEATURES] =
    ["cpu_usage", "memory_usage", "latency", "request_rate"];

/// Fixed-width feature vector in [`FEATURE_NAMES`] order
pub type FeatureRow = [f64; NUM_FEATURES];

/// Raw monitoring metrics for a single workload observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// CPU utilisation in percent (0-100 nominal, may exceed)
    pub cpu_usage: f64,
    /// Memory utilisation in percent
    pub memory_usage: f64,
    /// Request latency in milliseconds
    pub latency: f64,
    /// Requests per minute
    pub request_rate: f64,
}

impl MetricRecord {
    /// Sample workload used when a caller supplies no metrics
    pub const SAMPLE: MetricRecord = MetricRecord {
        cpu_usage: 78.0,
        memory_usage: 82.0,
        latency: 240.0,
        request_rate: 620.0,
    };

    pub fn new(cpu_usage: f64, memory_usage: f64, latency: f64, request_rate: f64) -> Self {
        Self {
            cpu_usage,
            memory_usage,
            latency,
            request_rate,
        }
    }

    /// Reject NaN and infinite values. Negative and out-of-range values are accepted.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.features()) {
            if !value.is_finite() {
                return Err(OptimizerError::Input(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn features(&self) -> FeatureRow {
        [
            self.cpu_usage,
            self.memory_usage,
            self.latency,
            self.request_rate,
        ]
    }
}

impl From<FeatureRow> for MetricRecord {
    fn from(row: FeatureRow) -> Self {
        Self::new(row[0], row[1], row[2], row[3])
    }
}

/// Metrics mapped onto their scoring ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub latency: f64,
    pub request_rate: f64,
}

/// Result record returned by the inference path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: f64,
    pub decision: Decision,
}

impl RiskAssessment {
    /// Build an assessment by applying the decision policy to `risk_score`
    pub fn from_score(risk_score: f64) -> Self {
        Self {
            risk_score,
            decision: Decision::from_score(risk_score),
        }
    }
}

/// Historical metrics row with its derived ground-truth label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingRow {
    #[serde(flatten)]
    pub metrics: MetricRecord,
    pub risk_label: u8,
}
