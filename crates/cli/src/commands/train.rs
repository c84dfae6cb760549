//! Model training command

use anyhow::{Context, Result};
use optimizer_lib::training::{LogisticRegression, TrainerConfig, TrainingPipeline};
use optimizer_lib::ArtifactStore;
use std::path::Path;
use tabled::Tabled;
use tracing::info;

use super::label::print_label_table;
use crate::output::{format_percent, print_info, print_success, OutputFormat};

#[derive(Tabled)]
struct CoefficientRow {
    #[tabled(rename = "Feature")]
    feature: String,
    #[tabled(rename = "Coefficient")]
    coefficient: String,
}

/// Train on the CSV at `data` and write both artifacts into `out`
pub fn run_training(
    data: &Path,
    out: &Path,
    c: f64,
    max_iterations: u64,
    format: OutputFormat,
) -> Result<()> {
    if !(c.is_finite() && c > 0.0) {
        anyhow::bail!("--c must be a positive number, got {}", c);
    }

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    let trainer = LogisticRegression::with_config(TrainerConfig {
        c,
        max_iterations,
        ..TrainerConfig::default()
    });
    info!(data = %data.display(), out = %out.display(), c, max_iterations, "Starting training");
    let pipeline = TrainingPipeline::with_trainer(ArtifactStore::new(out), trainer);
    let report = pipeline
        .run_from_path(data)
        .with_context(|| format!("Training on {} failed", data.display()))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_label_table(&report.labeled_rows);
            println!();
            print_success(&format!(
                "Trained on {} rows ({} high risk)",
                report.rows, report.positive_labels
            ));
            print_info(&format!(
                "Training accuracy: {}",
                format_percent(report.training_accuracy)
            ));

            // coefficients are read back from disk so the table reflects what was persisted
            let model = pipeline.store().load_model()?;
            let mut rows: Vec<CoefficientRow> = optimizer_lib::FEATURE_NAMES
                .iter()
                .zip(model.coefficients.iter())
                .map(|(name, coef)| CoefficientRow {
                    feature: name.to_string(),
                    coefficient: format!("{:+.4}", coef),
                })
                .collect();
            rows.push(CoefficientRow {
                feature: "(intercept)".to_string(),
                coefficient: format!("{:+.4}", model.intercept),
            });
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            println!("\nScaler: {}", report.scaler_path.display());
            println!("Model:  {}", report.model_path.display());
        }
    }

    Ok(())
}
