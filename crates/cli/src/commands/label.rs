//! Label preview command

use anyhow::{Context, Result};
use optimizer_lib::training::{label_records, Dataset};
use optimizer_lib::TrainingRow;
use std::path::Path;
use tabled::Tabled;

use crate::output::{color_label, format_metric, OutputFormat};

#[derive(Tabled)]
struct LabelRow {
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
    #[tabled(rename = "Label")]
    label: String,
}

pub fn show_labels(data: &Path, format: OutputFormat) -> Result<()> {
    let dataset = Dataset::from_path(data)
        .with_context(|| format!("Failed to read metrics from {}", data.display()))?;
    let rows = label_records(dataset.records());

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_label_table(&rows);
            let positive = rows.iter().filter(|r| r.risk_label == 1).count();
            println!("\nTotal: {} rows, {} high risk", rows.len(), positive);
        }
    }

    Ok(())
}

/// Print labeled rows as a table, numbered from 1
pub fn print_label_table(rows: &[TrainingRow]) {
    let table_rows: Vec<LabelRow> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| LabelRow {
            index: i + 1,
            cpu: format_metric(r.metrics.cpu_usage),
            memory: format_metric(r.metrics.memory_usage),
            latency: format_metric(r.metrics.latency),
            request_rate: format_metric(r.metrics.request_rate),
            label: color_label(r.risk_label),
        })
        .collect();

    let table = tabled::Table::new(table_rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);
}
