//! CSV dataset loading
//!
//! The header row must name the four metric columns; any other columns are
//! ignored. Every cell in a metric column must parse as a finite number.

use crate::error::{OptimizerError, Result};
use crate::models::{FeatureRow, MetricRecord, FEATURE_NAMES};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Immutable in-memory table of metric rows
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<MetricRecord>,
}

impl Dataset {
    /// Build a dataset from records already in memory
    pub fn from_records(records: Vec<MetricRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(OptimizerError::Dataset("dataset contains no rows".to_string()));
        }
        for (i, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| OptimizerError::Dataset(format!("row {}: {}", i + 1, e)))?;
        }
        Ok(Self { records })
    }

    /// Read a dataset from a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            OptimizerError::Dataset(format!("failed to open {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_reader(file)?;
        debug!(path = %path.display(), rows = dataset.len(), "Dataset read");
        Ok(dataset)
    }

    /// Read a dataset from any CSV source with a header row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let missing: Vec<&str> = FEATURE_NAMES
            .iter()
            .copied()
            .filter(|name| !headers.iter().any(|h| h == *name))
            .collect();
        if !missing.is_empty() {
            return Err(OptimizerError::Dataset(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let records = csv_reader
            .deserialize::<MetricRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn records(&self) -> &[MetricRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature matrix in column order [`FEATURE_NAMES`]
    pub fn feature_matrix(&self) -> Vec<FeatureRow> {
        self.records.iter().map(MetricRecord::features).collect()
    }
}
