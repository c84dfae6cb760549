//! Error types for the risk optimizer library

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = OptimizerError> = std::result::Result<T, E>;

/// Errors raised by the inference and training paths
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// Missing, non-numeric or non-finite metric input
    #[error("invalid input: {0}")]
    Input(String),

    /// Dataset could not be read or does not have the expected shape
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Feature column has zero variance, so min-max scaling would divide by zero
    #[error("feature '{feature}' has zero variance (every value is {value})")]
    DegenerateFeature { feature: &'static str, value: f64 },

    /// Model fitting failed
    #[error("training failed: {0}")]
    Training(String),

    /// Artifact could not be written or read
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Artifact contents do not match what was written
    #[error("corrupt artifact {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },
}

impl OptimizerError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for OptimizerError {
    fn from(e: csv::Error) -> Self {
        Self::Dataset(e.to_string())
    }
}
