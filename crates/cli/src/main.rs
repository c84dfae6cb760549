//! Cloud Risk Optimizer CLI
//!
//! A command-line tool for training the risk model, assessing workload
//! metrics and inspecting persisted artifacts.

mod commands;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::{assess, inspect, label, train};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Cloud Risk Optimizer CLI
#[derive(Parser)]
#[command(name = "cloudopt")]
#[command(author, version, about = "CLI for the Cloud Risk Optimizer", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Train the risk model from a metrics CSV and save the artifacts
    Train {
        /// Metrics CSV with a header row
        #[arg(long, short, env = "CLOUDOPT_DATA", default_value = "../data/sample_metrics.csv")]
        data: PathBuf,

        /// Directory to write the scaler and risk_model artifacts to
        #[arg(long, short, env = "CLOUDOPT_MODEL_DIR", default_value = ".")]
        out: PathBuf,

        /// Inverse regularization strength
        #[arg(long, default_value_t = 1.0)]
        c: f64,

        /// Maximum solver iterations
        #[arg(long, default_value_t = 100)]
        max_iterations: u64,
    },

    /// Assess workload metrics and recommend an action
    Assess(AssessArgs),

    /// Show the risk labels the training rule assigns to a dataset
    Label {
        /// Metrics CSV with a header row
        #[arg(long, short, env = "CLOUDOPT_DATA", default_value = "../data/sample_metrics.csv")]
        data: PathBuf,
    },

    /// Verify and describe persisted artifacts
    Inspect {
        /// Directory holding the scaler and risk_model artifacts
        #[arg(long, env = "CLOUDOPT_MODEL_DIR", default_value = ".")]
        model_dir: PathBuf,
    },
}

#[derive(Args)]
pub struct AssessArgs {
    /// CPU utilisation in percent
    #[arg(long)]
    pub cpu: Option<f64>,

    /// Memory utilisation in percent
    #[arg(long)]
    pub memory: Option<f64>,

    /// Request latency in milliseconds
    #[arg(long)]
    pub latency: Option<f64>,

    /// Requests per minute
    #[arg(long)]
    pub request_rate: Option<f64>,

    /// Score every row of a metrics CSV instead
    #[arg(long, short, conflicts_with_all = ["cpu", "memory", "latency", "request_rate"])]
    pub input: Option<PathBuf>,

    /// Score with the trained model in this directory instead of the weighted formula
    #[arg(long)]
    pub model_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Train {
            data,
            out,
            c,
            max_iterations,
        } => {
            train::run_training(&data, &out, c, max_iterations, cli.format)?;
        }
        Commands::Assess(args) => {
            assess::run_assess(args, cli.format)?;
        }
        Commands::Label { data } => {
            label::show_labels(&data, cli.format)?;
        }
        Commands::Inspect { model_dir } => {
            inspect::show_artifacts(&model_dir, cli.format)?;
        }
    }

    Ok(())
}
