//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use optimizer_lib::Decision;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No items found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => print_json(&items),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a risk score with two decimals
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Format a ratio as a percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Format a metric value without trailing zeros for whole numbers
pub fn format_metric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Color a decision by severity
pub fn color_decision(decision: Decision) -> String {
    let text = decision.as_str();
    match decision {
        Decision::ScaleUp => text.red().bold().to_string(),
        Decision::Monitor => text.yellow().to_string(),
        Decision::NoAction => text.green().to_string(),
    }
}

/// Color a risk label (1 = high risk)
pub fn color_label(label: u8) -> String {
    if label == 1 {
        "1 (high)".red().to_string()
    } else {
        "0 (low)".green().to_string()
    }
}
