//! Model-backed scoring using the persisted scaler and logistic model

use super::scorer::{round_to, SCORE_DECIMALS};
use super::RiskPredictor;
use crate::error::Result;
use crate::models::MetricRecord;
use crate::persistence::ArtifactStore;
use crate::training::{LogisticModel, ScalerState};
use std::time::Instant;
use tracing::debug;

/// Scores metrics as the trained model's high-risk probability
#[derive(Debug, Clone)]
pub struct ModelScorer {
    scaler: ScalerState,
    model: LogisticModel,
}

impl ModelScorer {
    pub fn new(scaler: ScalerState, model: LogisticModel) -> Self {
        Self { scaler, model }
    }

    /// Load the `scaler` and `risk_model` artifacts from a store
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let scaler = store.load_scaler()?;
        let model = store.load_model()?;
        Ok(Self::new(scaler, model))
    }

    /// Unrounded probability that the workload is high risk
    pub fn probability(&self, metrics: &MetricRecord) -> f64 {
        let scaled = self.scaler.transform(&metrics.features());
        self.model.predict_proba(&scaled)
    }

    pub fn scaler(&self) -> &ScalerState {
        &self.scaler
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }
}

impl RiskPredictor for ModelScorer {
    fn score(&self, metrics: &MetricRecord) -> Result<f64> {
        metrics.validate()?;
        let start = Instant::now();
        let probability = self.probability(metrics);
        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            probability,
            "Model inference completed"
        );
        Ok(round_to(probability, SCORE_DECIMALS))
    }

    fn name(&self) -> &str {
        "model"
    }
}
