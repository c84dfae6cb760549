//! Offline model training
//!
//! This module provides:
//! - CSV dataset loading
//! - Rule-based ground-truth labels
//! - Min-max feature scaling
//! - L2-regularized logistic regression
//! - The end-to-end pipeline that persists the fitted scaler and model

mod dataset;
mod label;
mod pipeline;
mod scaler;
mod trainer;

#[cfg(test)]
mod tests;

pub use dataset::Dataset;
pub use label::{
    label_records, risk_label, CPU_LABEL_THRESHOLD, LATENCY_LABEL_THRESHOLD,
    MEMORY_LABEL_THRESHOLD,
};
pub use pipeline::{FittedArtifacts, TrainingPipeline, TrainingReport};
pub use scaler::{MinMaxScaler, ScalerState};
pub use trainer::{LogisticModel, LogisticRegression, TrainerConfig, DECISION_THRESHOLD};
