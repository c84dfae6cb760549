//! End-to-end tests for the training pipeline
//!
//! These run the full load → label → fit → persist sequence against a
//! temporary artifact directory.

#[cfg(test)]
mod pipeline_tests {
    use crate::error::OptimizerError;
    use crate::models::MetricRecord;
    use crate::persistence::{ArtifactStore, MODEL_ARTIFACT, SCALER_ARTIFACT};
    use crate::predictor::{ModelScorer, RiskPredictor};
    use crate::training::{Dataset, TrainingPipeline};
    use std::fs;
    use tempfile::TempDir;

    const METRICS_CSV: &str = "\
cpu_usage,memory_usage,latency,request_rate
35,40,120,200
42,48,150,310
55,52,180,400
61,58,200,450
68,66,230,520
72,70,245,580
78,82,240,620
85,79,290,700
91,88,350,820
96,93,420,950
50,80,160,380
40,45,300,260
";

    fn write_csv(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("sample_metrics.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_from_path_writes_both_artifacts() {
        let temp_dir = TempDir::new().unwrap();
        let csv_path = write_csv(&temp_dir, METRICS_CSV);
        let store = ArtifactStore::new(temp_dir.path().join("models"));

        let report = TrainingPipeline::new(store.clone())
            .run_from_path(&csv_path)
            .unwrap();

        assert_eq!(report.rows, 12);
        assert_eq!(report.positive_labels, 6);
        // one row sits on the decision boundary, so allow it either way
        assert!(report.training_accuracy >= 0.6, "accuracy {}", report.training_accuracy);
        assert_eq!(report.labeled_rows.len(), 12);
        assert_eq!(report.labeled_rows[0].risk_label, 0);
        assert_eq!(report.labeled_rows[9].risk_label, 1);
        assert_eq!(report.scaler_path, store.path_for(SCALER_ARTIFACT));
        assert_eq!(report.model_path, store.path_for(MODEL_ARTIFACT));
        assert!(report.scaler_path.exists());
        assert!(report.model_path.exists());
    }

    #[test]
    fn test_fit_labels_and_scales() {
        let temp_dir = TempDir::new().unwrap();
        let dataset = Dataset::from_reader(METRICS_CSV.as_bytes()).unwrap();
        let pipeline = TrainingPipeline::new(ArtifactStore::new(temp_dir.path()));

        let fitted = pipeline.fit(&dataset).unwrap();
        let labels: Vec<u8> = fitted.rows.iter().map(|r| r.risk_label).collect();
        assert_eq!(labels, vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
        assert_eq!(fitted.scaler.min, [35.0, 40.0, 120.0, 200.0]);
        assert_eq!(fitted.scaler.max, [96.0, 93.0, 420.0, 950.0]);

        // the rule keys on memory and latency, so those weights must be positive
        assert!(fitted.model.coefficients[1] > 0.0);
        assert!(fitted.model.coefficients[2] > 0.0);

        // fit alone does not touch the store
        assert!(!pipeline.store().path_for(SCALER_ARTIFACT).exists());
    }

    #[test]
    fn test_persisted_model_matches_in_memory_fit() {
        let temp_dir = TempDir::new().unwrap();
        let dataset = Dataset::from_reader(METRICS_CSV.as_bytes()).unwrap();
        let store = ArtifactStore::new(temp_dir.path());
        let pipeline = TrainingPipeline::new(store.clone());

        let fitted = pipeline.fit(&dataset).unwrap();
        pipeline.run(&dataset).unwrap();

        let scorer = ModelScorer::load(&store).unwrap();
        let in_memory = ModelScorer::new(fitted.scaler, fitted.model);
        for record in dataset.records() {
            let a = scorer.probability(record);
            let b = in_memory.probability(record);
            assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_model_scorer_ranks_hot_workload_higher() {
        let temp_dir = TempDir::new().unwrap();
        let dataset = Dataset::from_reader(METRICS_CSV.as_bytes()).unwrap();
        let store = ArtifactStore::new(temp_dir.path());
        TrainingPipeline::new(store.clone()).run(&dataset).unwrap();

        let scorer = ModelScorer::load(&store).unwrap();
        let cool = scorer.score(&MetricRecord::new(30.0, 35.0, 100.0, 150.0)).unwrap();
        let hot = scorer.score(&MetricRecord::new(98.0, 95.0, 450.0, 990.0)).unwrap();
        assert!(hot > cool);
        assert!((0.0..=1.0).contains(&hot));
    }

    #[test]
    fn test_constant_column_fails_before_writing() {
        let csv = "\
cpu_usage,memory_usage,latency,request_rate
40,50,100,500
80,50,300,500
";
        let temp_dir = TempDir::new().unwrap();
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let store = ArtifactStore::new(temp_dir.path());

        let err = TrainingPipeline::new(store.clone()).run(&dataset).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::DegenerateFeature { feature: "memory_usage", .. }
        ));
        assert!(!store.path_for(SCALER_ARTIFACT).exists());
        assert!(!store.path_for(MODEL_ARTIFACT).exists());
    }

    #[test]
    fn test_single_class_dataset_fails() {
        let csv = "\
cpu_usage,memory_usage,latency,request_rate
10,20,30,40
20,30,40,50
30,40,50,60
";
        let temp_dir = TempDir::new().unwrap();
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let err = TrainingPipeline::new(ArtifactStore::new(temp_dir.path()))
            .run(&dataset)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Training(_)));
    }

    #[test]
    fn test_unwritable_store_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("occupied");
        fs::write(&blocker, b"not a directory").unwrap();
        let dataset = Dataset::from_reader(METRICS_CSV.as_bytes()).unwrap();

        let err = TrainingPipeline::new(ArtifactStore::new(&blocker))
            .run(&dataset)
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Storage { .. }));
    }

    #[test]
    fn test_missing_dataset_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = TrainingPipeline::new(ArtifactStore::new(temp_dir.path()))
            .run_from_path(&temp_dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Dataset(_)));
    }
}
