//! Risk assessment command

use anyhow::{Context, Result};
use optimizer_lib::training::Dataset;
use optimizer_lib::{
    ArtifactStore, MetricRecord, ModelScorer, RiskAssessment, RiskPredictor, WeightedScorer,
};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use crate::output::{color_decision, format_metric, format_score, print_info, OutputFormat};
use crate::AssessArgs;

/// Row for assessments table
#[derive(Tabled)]
struct AssessmentRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "CPU %")]
    cpu: String,
    #[tabled(rename = "Memory %")]
    memory: String,
    #[tabled(rename = "Latency ms")]
    latency: String,
    #[tabled(rename = "Req/min")]
    request_rate: String,
    #[tabled(rename = "Risk")]
    risk_score: String,
    #[tabled(rename = "Decision")]
    decision: String,
}

#[derive(Serialize)]
struct AssessedRecord {
    #[serde(flatten)]
    metrics: MetricRecord,
    #[serde(flatten)]
    assessment: RiskAssessment,
}

/// Assess either one workload given on the command line or every row of a CSV
pub fn run_assess(args: AssessArgs, format: OutputFormat) -> Result<()> {
    let predictor = build_predictor(args.model_dir.as_deref())?;

    let records = match &args.input {
        Some(path) => Dataset::from_path(path)
            .with_context(|| format!("Failed to read metrics from {}", path.display()))?
            .records()
            .to_vec(),
        None => vec![single_record(&args)?],
    };

    let mut results = Vec::with_capacity(records.len());
    for (i, metrics) in records.into_iter().enumerate() {
        let assessment = predictor
            .assess(&metrics)
            .with_context(|| format!("Failed to assess record {}", i + 1))?;
        results.push(AssessedRecord {
            metrics,
            assessment,
        });
    }

    match format {
        OutputFormat::Json => {
            // a single workload prints a bare assessment, like the handler
            let json = match (args.input.is_none(), results.first()) {
                (true, Some(only)) => serde_json::to_string_pretty(&only.assessment)?,
                _ => serde_json::to_string_pretty(&results)?,
            };
            println!("{}", json);
        }
        OutputFormat::Table => {
            let rows: Vec<AssessmentRow> = results
                .iter()
                .enumerate()
                .map(|(i, r)| AssessmentRow {
                    index: i + 1,
                    cpu: format_metric(r.metrics.cpu_usage),
                    memory: format_metric(r.metrics.memory_usage),
                    latency: format_metric(r.metrics.latency),
                    request_rate: format_metric(r.metrics.request_rate),
                    risk_score: format_score(r.assessment.risk_score),
                    decision: color_decision(r.assessment.decision),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
            print_info(&format!("Scored with the {} scorer", predictor.name()));
        }
    }

    Ok(())
}

fn build_predictor(model_dir: Option<&Path>) -> Result<Box<dyn RiskPredictor>> {
    match model_dir {
        Some(dir) => {
            let scorer = ModelScorer::load(&ArtifactStore::new(dir))
                .with_context(|| format!("Failed to load model artifacts from {}", dir.display()))?;
            Ok(Box::new(scorer))
        }
        None => Ok(Box::new(WeightedScorer::new())),
    }
}

/// All four metric flags, or none for the sample workload
fn single_record(args: &AssessArgs) -> Result<MetricRecord> {
    match (args.cpu, args.memory, args.latency, args.request_rate) {
        (Some(cpu), Some(memory), Some(latency), Some(request_rate)) => {
            Ok(MetricRecord::new(cpu, memory, latency, request_rate))
        }
        (None, None, None, None) => Ok(MetricRecord::SAMPLE),
        _ => anyhow::bail!(
            "--cpu, --memory, --latency and --request-rate must be given together"
        ),
    }
}
