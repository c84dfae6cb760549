//! Offline training pipeline: load → label → scale → fit → persist

use super::dataset::Dataset;
use super::label::label_records;
use super::scaler::{MinMaxScaler, ScalerState};
use super::trainer::{LogisticModel, LogisticRegression};
use crate::error::Result;
use crate::models::TrainingRow;
use crate::observability::{OptimizerMetrics, StructuredLogger};
use crate::persistence::ArtifactStore;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Summary of a completed training run
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub rows: usize,
    pub positive_labels: usize,
    /// Accuracy of the fitted model on its own scaled training set
    pub training_accuracy: f64,
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
    /// Every input row with its generated label, in file order
    pub labeled_rows: Vec<TrainingRow>,
}

/// In-memory result of fitting, before anything is written
#[derive(Debug, Clone)]
pub struct FittedArtifacts {
    pub rows: Vec<TrainingRow>,
    pub scaler: ScalerState,
    pub model: LogisticModel,
    pub training_accuracy: f64,
}

/// Runs the training stages with explicit inputs and outputs
pub struct TrainingPipeline {
    store: ArtifactStore,
    trainer: LogisticRegression,
    logger: StructuredLogger,
    metrics: OptimizerMetrics,
}

impl TrainingPipeline {
    pub fn new(store: ArtifactStore) -> Self {
        Self::with_trainer(store, LogisticRegression::new())
    }

    pub fn with_trainer(store: ArtifactStore, trainer: LogisticRegression) -> Self {
        Self {
            store,
            trainer,
            logger: StructuredLogger::new("training"),
            metrics: OptimizerMetrics::new(),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Read the CSV at `path` and run the full pipeline
    pub fn run_from_path(&self, path: &Path) -> Result<TrainingReport> {
        let dataset = Dataset::from_path(path)?;
        self.logger.log_dataset_loaded(&path.display().to_string(), dataset.len());
        self.run(&dataset)
    }

    /// Label, fit and persist
    pub fn run(&self, dataset: &Dataset) -> Result<TrainingReport> {
        let start = Instant::now();
        let fitted = self.fit(dataset)?;

        let scaler_path = self.persist(|store| store.save_scaler(&fitted.scaler))?;
        let model_path = self.persist(|store| store.save_model(&fitted.model))?;

        let elapsed = start.elapsed().as_secs_f64();
        self.metrics.observe_training_duration(elapsed);

        let report = TrainingReport {
            rows: fitted.rows.len(),
            positive_labels: count_positive(&fitted.rows),
            training_accuracy: fitted.training_accuracy,
            scaler_path,
            model_path,
            labeled_rows: fitted.rows,
        };
        self.logger.log_model_trained(
            report.rows,
            report.positive_labels,
            report.training_accuracy,
            elapsed,
        );
        Ok(report)
    }

    /// Label, fit the scaler, then fit the model, without persisting
    pub fn fit(&self, dataset: &Dataset) -> Result<FittedArtifacts> {
        let rows = label_records(dataset.records());
        self.logger.log_labels_generated(rows.len(), count_positive(&rows));
        self.metrics.set_training_rows(rows.len() as i64);

        let features = dataset.feature_matrix();
        let labels: Vec<u8> = rows.iter().map(|r| r.risk_label).collect();

        let (scaler, scaled) = MinMaxScaler::new().fit_transform(&features)?;
        let model = self.trainer.clone().fit(&scaled, &labels)?;
        let training_accuracy = model.accuracy(&scaled, &labels);

        Ok(FittedArtifacts {
            rows,
            scaler,
            model,
            training_accuracy,
        })
    }

    fn persist<F>(&self, save: F) -> Result<PathBuf>
    where
        F: FnOnce(&ArtifactStore) -> Result<PathBuf>,
    {
        save(&self.store).map_err(|e| {
            self.metrics.inc_artifact_errors();
            e
        })
    }
}

fn count_positive(rows: &[TrainingRow]) -> usize {
    rows.iter().filter(|r| r.risk_label == 1).count()
}
