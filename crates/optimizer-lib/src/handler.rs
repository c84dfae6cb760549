//! Event-driven inference entry point
//!
//! Accepts an optional event carrying a metrics record and returns
//! `{ risk_score, decision }`. When no metrics are supplied the sample
//! workload [`MetricRecord::SAMPLE`] is scored instead.

use crate::error::{OptimizerError, Result};
use crate::models::{MetricRecord, RiskAssessment};
use crate::observability::{OptimizerMetrics, StructuredLogger};
use crate::predictor::{RiskPredictor, WeightedScorer};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Invocation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlerEvent {
    #[serde(default)]
    pub metrics: Option<MetricRecord>,
}

impl HandlerEvent {
    pub fn with_metrics(metrics: MetricRecord) -> Self {
        Self {
            metrics: Some(metrics),
        }
    }
}

/// Caller-supplied invocation metadata. Only used for log correlation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationContext {
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub function_name: Option<String>,
}

/// Parse a raw event document. Blank input means no event.
pub fn parse_event(raw: &str) -> Result<Option<HandlerEvent>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(raw)
        .map(Some)
        .map_err(|e| OptimizerError::Input(format!("malformed event: {}", e)))
}

/// Inference handler wrapping a scorer with logging and metrics
pub struct RiskHandler {
    predictor: Box<dyn RiskPredictor>,
    logger: StructuredLogger,
    metrics: OptimizerMetrics,
}

impl Default for RiskHandler {
    fn default() -> Self {
        Self::new(Box::new(WeightedScorer::new()))
    }
}

impl RiskHandler {
    pub fn new(predictor: Box<dyn RiskPredictor>) -> Self {
        Self {
            predictor,
            logger: StructuredLogger::new("handler"),
            metrics: OptimizerMetrics::new(),
        }
    }

    pub fn scorer_name(&self) -> &str {
        self.predictor.name()
    }

    /// Score the event's metrics, falling back to the sample workload
    pub fn handle(
        &self,
        event: Option<HandlerEvent>,
        context: Option<&InvocationContext>,
    ) -> Result<RiskAssessment> {
        let request_id = context.and_then(|c| c.request_id.as_deref());

        let metrics = match event.and_then(|e| e.metrics) {
            Some(metrics) => metrics,
            None => {
                self.logger.log_default_metrics(request_id);
                MetricRecord::SAMPLE
            }
        };

        if let Err(e) = metrics.validate() {
            self.metrics.inc_invalid_inputs();
            self.logger.log_invalid_input(&e.to_string(), request_id);
            return Err(e);
        }

        let start = Instant::now();
        let assessment = self.predictor.assess(&metrics)?;
        self.metrics
            .observe_assessment_latency(start.elapsed().as_secs_f64());
        self.metrics
            .inc_assessments(&assessment, self.predictor.name());
        self.logger
            .log_assessment(&metrics, &assessment, self.predictor.name(), context);

        Ok(assessment)
    }
}

/// Handle an event with the weighted scorer
pub fn handle(
    event: Option<HandlerEvent>,
    context: Option<&InvocationContext>,
) -> Result<RiskAssessment> {
    RiskHandler::default().handle(event, context)
}
