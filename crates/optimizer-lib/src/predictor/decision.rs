//! Decision policy: maps a risk score to a remediation action

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound (inclusive) of the high-risk band
pub const SCALE_UP_THRESHOLD: f64 = 0.75;

/// Lower bound (inclusive) of the moderate-risk band
pub const MONITOR_THRESHOLD: f64 = 0.45;

/// Remediation action for a workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "SCALE UP resources (High Risk Detected)")]
    ScaleUp,
    #[serde(rename = "MONITOR closely (Moderate Risk)")]
    Monitor,
    #[serde(rename = "NO ACTION required (System Healthy)")]
    NoAction,
}

impl Decision {
    /// Bands are checked from highest to lowest; first match wins.
    pub fn from_score(risk_score: f64) -> Self {
        if risk_score >= SCALE_UP_THRESHOLD {
            Decision::ScaleUp
        } else if risk_score >= MONITOR_THRESHOLD {
            Decision::Monitor
        } else {
            Decision::NoAction
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::ScaleUp => "SCALE UP resources (High Risk Detected)",
            Decision::Monitor => "MONITOR closely (Moderate Risk)",
            Decision::NoAction => "NO ACTION required (System Healthy)",
        }
    }

    /// Short label used for metric labels and log fields
    pub fn key(&self) -> &'static str {
        match self {
            Decision::ScaleUp => "scale_up",
            Decision::Monitor => "monitor",
            Decision::NoAction => "no_action",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Decision::from_score(0.75), Decision::ScaleUp);
        assert_eq!(Decision::from_score(0.7499), Decision::Monitor);
        assert_eq!(Decision::from_score(0.45), Decision::Monitor);
        assert_eq!(Decision::from_score(0.4499), Decision::NoAction);
    }

    #[test]
    fn test_out_of_range_scores() {
        assert_eq!(Decision::from_score(1.4), Decision::ScaleUp);
        assert_eq!(Decision::from_score(-0.2), Decision::NoAction);
        assert_eq!(Decision::from_score(0.0), Decision::NoAction);
    }

    #[test]
    fn test_display_matches_serialized_form() {
        for decision in [Decision::ScaleUp, Decision::Monitor, Decision::NoAction] {
            let json = serde_json::to_string(&decision).unwrap();
            assert_eq!(json, format!("\"{}\"", decision));
            let back: Decision = serde_json::from_str(&json).unwrap();
            assert_eq!(back, decision);
        }
    }
}
