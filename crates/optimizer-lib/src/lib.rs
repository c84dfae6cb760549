//! Risk optimizer library for cloud workloads
//!
//! This crate provides the core functionality for:
//! - Metric normalization and weighted risk scoring
//! - Mapping risk scores to remediation decisions
//! - Offline training of a logistic risk model on labeled metrics
//! - Persisting and reloading the fitted scaler and model
//! - Observability

pub mod error;
pub mod handler;
pub mod models;
pub mod observability;
pub mod persistence;
pub mod predictor;
pub mod training;

pub use error::{OptimizerError, Result};
pub use handler::{handle, HandlerEvent, InvocationContext, RiskHandler};
pub use models::*;
pub use observability::{OptimizerMetrics, StructuredLogger};
pub use persistence::ArtifactStore;
pub use predictor::{Decision, ModelScorer, RiskPredictor, WeightedScorer};
