//! Risk inference engine
//!
//! Normalizer → scorer → decision policy. The default scorer is the fixed
//! weighted formula; [`ModelScorer`] scores with a persisted scaler and
//! logistic model instead.

mod decision;
mod model;
mod normalizer;
mod scorer;

pub use decision::{Decision, MONITOR_THRESHOLD, SCALE_UP_THRESHOLD};
pub use model::ModelScorer;
pub use normalizer::{normalize, LATENCY_CEILING_MS, PERCENT_SCALE, REQUEST_RATE_CEILING};
pub use scorer::{
    risk_score, round_to, WeightedScorer, CPU_WEIGHT, LATENCY_WEIGHT, MEMORY_WEIGHT,
    REQUEST_WEIGHT, SCORE_DECIMALS,
};

use crate::error::Result;
use crate::models::{MetricRecord, RiskAssessment};

/// Trait for risk scoring implementations
pub trait RiskPredictor: Send + Sync {
    /// Risk score for a metrics record, rounded to [`SCORE_DECIMALS`]
    fn score(&self, metrics: &MetricRecord) -> Result<f64>;

    /// Short identifier used in logs and metrics
    fn name(&self) -> &str;

    /// Score and apply the decision policy
    fn assess(&self, metrics: &MetricRecord) -> Result<RiskAssessment> {
        let risk_score = self.score(metrics)?;
        Ok(RiskAssessment::from_score(risk_score))
    }
}

/// Score the given metrics with the weighted formula and decide an action
pub fn assess(metrics: &MetricRecord) -> RiskAssessment {
    RiskAssessment::from_score(WeightedScorer.score_metrics(metrics))
}
