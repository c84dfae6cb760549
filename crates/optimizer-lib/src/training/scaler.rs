//! Min-max feature scaling
//!
//! `fit` learns per-column bounds from the training matrix; the resulting
//! [`ScalerState`] is persisted and reused to transform inference inputs.
//! Values outside the fitted range map outside [0, 1].

use crate::error::{OptimizerError, Result};
use crate::models::{FeatureRow, FEATURE_NAMES, NUM_FEATURES};
use serde::{Deserialize, Serialize};

/// Unfitted min-max scaler
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxScaler;

impl MinMaxScaler {
    pub fn new() -> Self {
        Self
    }

    /// Learn per-feature bounds.
    ///
    /// Fails with [`OptimizerError::DegenerateFeature`] when a column is
    /// constant, since transforming it would divide by zero.
    pub fn fit(&self, rows: &[FeatureRow]) -> Result<ScalerState> {
        let first = rows.first().ok_or_else(|| {
            OptimizerError::Dataset("cannot fit scaler on an empty feature matrix".to_string())
        })?;

        let mut min = *first;
        let mut max = *first;
        for row in &rows[1..] {
            for j in 0..NUM_FEATURES {
                min[j] = min[j].min(row[j]);
                max[j] = max[j].max(row[j]);
            }
        }

        for j in 0..NUM_FEATURES {
            if max[j] - min[j] == 0.0 {
                return Err(OptimizerError::DegenerateFeature {
                    feature: FEATURE_NAMES[j],
                    value: min[j],
                });
            }
        }

        Ok(ScalerState { min, max })
    }

    /// Fit on `rows` and return the state together with the scaled rows
    pub fn fit_transform(&self, rows: &[FeatureRow]) -> Result<(ScalerState, Vec<FeatureRow>)> {
        let state = self.fit(rows)?;
        let scaled = state.transform_batch(rows);
        Ok((state, scaled))
    }
}

/// Fitted per-feature bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerState {
    pub min: FeatureRow,
    pub max: FeatureRow,
}

impl ScalerState {
    /// Map each value to `(v - min) / (max - min)`
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut out = [0.0; NUM_FEATURES];
        for j in 0..NUM_FEATURES {
            out[j] = (row[j] - self.min[j]) / (self.max[j] - self.min[j]);
        }
        out
    }

    pub fn transform_batch(&self, rows: &[FeatureRow]) -> Vec<FeatureRow> {
        rows.iter().map(|row| self.transform(row)).collect()
    }
}
