//! L2-regularized logistic regression
//!
//! Fitting is delegated to `linfa-logistic`, which minimizes
//! `sum(logloss) + 0.5 * alpha * ||w||^2` with an unpenalized intercept.
//! `alpha = 1 / C`, so `C = 1.0` gives the conventional default penalty.
//! The fitted weights are copied into [`LogisticModel`], the plain state
//! that is persisted and evaluated at inference time.

use crate::error::{OptimizerError, Result};
use crate::models::{FeatureRow, NUM_FEATURES};
use linfa::traits::Fit;
use linfa::Dataset;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Probability at or above which `predict` returns 1
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Trainer hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Inverse regularization strength
    pub c: f64,
    /// Gradient tolerance passed to the L-BFGS solver
    pub tolerance: f64,
    /// Maximum solver iterations
    pub max_iterations: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            tolerance: 1e-4,
            max_iterations: 100,
        }
    }
}

/// Unfitted logistic regression. Fitting consumes it and yields a [`LogisticModel`].
#[derive(Debug, Clone, Default)]
pub struct LogisticRegression {
    config: TrainerConfig,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Fit on scaled features `x` against binary labels `y`
    pub fn fit(self, x: &[FeatureRow], y: &[u8]) -> Result<LogisticModel> {
        if x.is_empty() {
            return Err(OptimizerError::Training("no training rows".to_string()));
        }
        if x.len() != y.len() {
            return Err(OptimizerError::Training(format!(
                "{} feature rows but {} labels",
                x.len(),
                y.len()
            )));
        }
        if let Some(bad) = y.iter().find(|&&label| label > 1) {
            return Err(OptimizerError::Training(format!(
                "labels must be 0 or 1, found {}",
                bad
            )));
        }
        let positives = y.iter().filter(|&&label| label == 1).count();
        if positives == 0 || positives == y.len() {
            return Err(OptimizerError::Training(format!(
                "labels contain a single class ({}); need both 0 and 1",
                if positives == 0 { 0 } else { 1 }
            )));
        }
        if self.config.c <= 0.0 || !self.config.c.is_finite() {
            return Err(OptimizerError::Training(format!(
                "regularization strength C must be positive, got {}",
                self.config.c
            )));
        }

        let records = Array2::from_shape_vec(
            (x.len(), NUM_FEATURES),
            x.iter().flatten().copied().collect(),
        )
        .map_err(|e| OptimizerError::Training(format!("invalid feature matrix: {}", e)))?;
        let targets = Array1::from_vec(y.to_vec());
        let dataset = Dataset::new(records, targets);

        let fitted = linfa_logistic::LogisticRegression::default()
            .alpha(1.0 / self.config.c)
            .gradient_tolerance(self.config.tolerance)
            .max_iterations(self.config.max_iterations)
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| OptimizerError::Training(e.to_string()))?;

        // linfa picks which class it treats as positive; flip to score class 1
        let sign = if fitted.labels().pos.class == 1 { 1.0 } else { -1.0 };
        let mut coefficients = [0.0; NUM_FEATURES];
        for (dst, src) in coefficients.iter_mut().zip(fitted.params().iter()) {
            *dst = sign * src;
        }
        let intercept = sign * fitted.intercept();

        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(OptimizerError::Training(
                "solver produced non-finite weights".to_string(),
            ));
        }

        debug!(?coefficients, intercept, "Logistic regression fitted");
        Ok(LogisticModel {
            coefficients,
            intercept,
        })
    }
}

/// Fitted linear classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: FeatureRow,
    pub intercept: f64,
}

impl LogisticModel {
    /// Signed distance from the decision boundary (log-odds)
    pub fn decision_function(&self, x: &FeatureRow) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept
    }

    /// Probability of the high-risk class
    pub fn predict_proba(&self, x: &FeatureRow) -> f64 {
        sigmoid(self.decision_function(x))
    }

    pub fn predict(&self, x: &FeatureRow) -> u8 {
        u8::from(self.predict_proba(x) >= DECISION_THRESHOLD)
    }

    /// Fraction of rows whose prediction matches the label
    pub fn accuracy(&self, x: &[FeatureRow], y: &[u8]) -> f64 {
        if x.is_empty() {
            return 0.0;
        }
        let correct = x
            .iter()
            .zip(y)
            .filter(|(row, &label)| self.predict(row) == label)
            .count();
        correct as f64 / x.len() as f64
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
