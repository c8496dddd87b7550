//! Focus report encoder
//!
//! Encodes a day's resolved signals and the resulting focus minutes into a JSON
//! report carrying producer metadata.

use crate::calculator::FocusScoreCalculator;
use crate::config::WeightConfiguration;
use crate::engine::ResolvedSignals;
use crate::error::FocusError;
use crate::types::{FocusMinutes, SignalBreakdown, SignalDurations, SignalKind};
use crate::{FLUX_VERSION, PRODUCER_NAME};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// A single day's focus report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusReport {
    pub report_version: String,
    pub producer: ReportProducer,
    pub date: NaiveDate,
    /// When this report was computed (RFC3339)
    pub computed_at_utc: String,
    pub signals: SignalDurations,
    pub weights: WeightConfiguration,
    pub breakdown: SignalBreakdown,
    pub focus_minutes: FocusMinutes,
    /// Fraction of signals that resolved (0-1)
    pub data_quality: f64,
    /// Signals that were replaced by zero
    pub unavailable_signals: Vec<SignalKind>,
}

/// Focus report encoder
pub struct FocusReportEncoder {
    instance_id: String,
}

impl Default for FocusReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Encode resolved signals into a report
    pub fn encode(
        &self,
        resolved: &ResolvedSignals,
        calculator: &FocusScoreCalculator,
    ) -> FocusReport {
        let breakdown = calculator.breakdown(&resolved.signals);

        FocusReport {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: FLUX_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            date: resolved.date,
            computed_at_utc: Utc::now().to_rfc3339(),
            signals: resolved.signals,
            weights: *calculator.weights(),
            breakdown,
            focus_minutes: breakdown.focus_minutes,
            data_quality: resolved.data_quality(),
            unavailable_signals: resolved.unavailable.clone(),
        }
    }

    /// Encode to a pretty-printed JSON string
    pub fn encode_to_json(
        &self,
        resolved: &ResolvedSignals,
        calculator: &FocusScoreCalculator,
    ) -> Result<String, FocusError> {
        let report = self.encode(resolved, calculator);
        serde_json::to_string_pretty(&report).map_err(|e| FocusError::EncodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolved(signals: SignalDurations, unavailable: Vec<SignalKind>) -> ResolvedSignals {
        ResolvedSignals {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            signals,
            unavailable,
        }
    }

    #[test]
    fn test_encode_report() {
        let encoder = FocusReportEncoder::with_instance_id("fixed-id".to_string());
        let report = encoder.encode(
            &resolved(SignalDurations::new(3600.0, 0.0, 0.0), vec![]),
            &FocusScoreCalculator::default(),
        );

        assert_eq!(report.report_version, REPORT_VERSION);
        assert_eq!(
            report.producer,
            ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: FLUX_VERSION.to_string(),
                instance_id: "fixed-id".to_string(),
            }
        );
        assert_eq!(report.focus_minutes, FocusMinutes(48));
        assert_eq!(report.breakdown.focus_minutes, report.focus_minutes);
        assert_eq!(report.weights, WeightConfiguration::DEFAULT);
        assert_eq!(report.data_quality, 1.0);
    }

    #[test]
    fn test_encode_records_unavailable_signals() {
        let encoder = FocusReportEncoder::new();
        let report = encoder.encode(
            &resolved(
                SignalDurations::new(600.0, 0.0, 0.0),
                vec![SignalKind::Mindful, SignalKind::Interrupt],
            ),
            &FocusScoreCalculator::default(),
        );

        assert_eq!(
            report.unavailable_signals,
            vec![SignalKind::Mindful, SignalKind::Interrupt]
        );
        assert!((report.data_quality - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_encode_to_json_shape() {
        let encoder = FocusReportEncoder::new();
        let json = encoder
            .encode_to_json(
                &resolved(SignalDurations::new(0.0, 0.0, 100.0), vec![]),
                &FocusScoreCalculator::default(),
            )
            .unwrap();

        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["report_version"], "1.0.0");
        assert_eq!(payload["producer"]["name"], "focus-flux");
        assert_eq!(payload["date"], "2024-01-15");
        assert_eq!(payload["focus_minutes"], 0);
        assert_eq!(payload["breakdown"]["raw_seconds"], -200.0);
        assert_eq!(payload["weights"]["minimum_focus_duration"], 1800.0);
        assert_eq!(payload["signals"]["interrupt_duration"], 100.0);
    }

    #[test]
    fn test_unique_instance_ids() {
        let a = FocusReportEncoder::new();
        let b = FocusReportEncoder::new();
        assert_ne!(a.instance_id(), b.instance_id());
    }
}
