//! Handler configuration

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Which scorer backs the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Fixed weighted formula
    #[default]
    Weighted,
    /// Persisted scaler and logistic model
    Model,
}

/// Handler configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    /// Scorer used for assessments
    #[serde(default)]
    pub scoring_mode: ScoringMode,

    /// Directory holding the `scaler` and `risk_model` artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Emit JSON log lines instead of human-readable output
    #[serde(default = "default_log_json")]
    pub log_json: bool,

    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print Prometheus metrics to stderr after handling
    #[serde(default)]
    pub emit_metrics: bool,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_json() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            scoring_mode: ScoringMode::default(),
            model_dir: default_model_dir(),
            log_json: default_log_json(),
            log_level: default_log_level(),
            emit_metrics: false,
        }
    }
}

impl HandlerConfig {
    /// Load configuration from an optional `optimizer.{toml,json,yaml}` file
    /// in the working directory, overridden by `OPTIMIZER_*` variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("optimizer").required(false))
            .add_source(config::Environment::with_prefix("OPTIMIZER").try_parsing(true))
            .build()
            .context("Failed to read handler configuration")?;

        config
            .try_deserialize()
            .context("Invalid handler configuration")
    }
}
