//! Risk Handler - event-driven risk assessment entry point
//!
//! Reads an optional event document (file path argument, or stdin when
//! piped), assesses the workload's metrics and prints the result JSON.
//! With no event, the built-in sample workload is assessed.

use anyhow::{Context, Result};
use optimizer_lib::{
    handler::{parse_event, InvocationContext},
    ArtifactStore, ModelScorer, RiskHandler, RiskPredictor, StructuredLogger, WeightedScorer,
    OptimizerMetrics,
};
use std::io::{IsTerminal, Read};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{HandlerConfig, ScoringMode};

const HANDLER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(config: &HandlerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    // logs go to stderr so stdout carries only the result document
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_event_source() -> Result<String> {
    if let Some(path) = std::env::args().nth(1) {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read event file {}", path));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut raw = String::new();
    stdin
        .lock()
        .read_to_string(&mut raw)
        .context("Failed to read event from stdin")?;
    Ok(raw)
}

fn build_predictor(config: &HandlerConfig) -> Result<Box<dyn RiskPredictor>> {
    match config.scoring_mode {
        ScoringMode::Weighted => Ok(Box::new(WeightedScorer::new())),
        ScoringMode::Model => {
            let logger = StructuredLogger::new("handler");
            let dir = config.model_dir.display().to_string();
            let store = ArtifactStore::new(&config.model_dir);
            match ModelScorer::load(&store) {
                Ok(scorer) => {
                    logger.log_artifacts_loaded(&dir, true);
                    Ok(Box::new(scorer))
                }
                Err(e) => {
                    logger.log_artifacts_loaded(&dir, false);
                    Err(e).with_context(|| format!("Failed to load model artifacts from {}", dir))
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let config = HandlerConfig::load()?;
    init_tracing(&config);

    info!(
        version = HANDLER_VERSION,
        scoring_mode = ?config.scoring_mode,
        "Starting risk-handler"
    );

    let raw = read_event_source()?;
    let event = parse_event(&raw)?;
    let context = InvocationContext {
        request_id: std::env::var("OPTIMIZER_REQUEST_ID").ok(),
        function_name: Some("risk-handler".to_string()),
    };

    let handler = RiskHandler::new(build_predictor(&config)?);
    let assessment = handler.handle(event, Some(&context))?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);

    if config.emit_metrics {
        eprint!("{}", OptimizerMetrics::new().render());
    }

    Ok(())
}
