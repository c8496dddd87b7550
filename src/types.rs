//! Core data types for Focus Flux
//!
//! These types carry the daily signal durations into the calculator and the
//! results back out. None of them hold behavior beyond construction.

use crate::error::FocusError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Seconds in one calendar day; collectors are expected to stay within it.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// The three behavioral signals feeding the focus estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// Device held physically stationary
    Still,
    /// Recorded mindful sessions
    Mindful,
    /// Time attributable to notification interruptions
    Interrupt,
}

impl SignalKind {
    /// All signal kinds in evaluation order
    pub const ALL: [SignalKind; 3] = [
        SignalKind::Still,
        SignalKind::Mindful,
        SignalKind::Interrupt,
    ];

    /// Stable lower_snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Still => "still",
            SignalKind::Mindful => "mindful",
            SignalKind::Interrupt => "interrupt",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day's accumulated duration per signal, in seconds.
///
/// Values are not validated; negative or oversized durations simply take part
/// in the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SignalDurations {
    /// Seconds the device was stationary
    #[serde(default, alias = "still")]
    pub still_duration: f64,
    /// Seconds of recorded mindful activity
    #[serde(default, alias = "mindful")]
    pub mindful_duration: f64,
    /// Seconds attributable to notification interruptions
    #[serde(default, alias = "interrupt")]
    pub interrupt_duration: f64,
}

impl SignalDurations {
    pub fn new(still_duration: f64, mindful_duration: f64, interrupt_duration: f64) -> Self {
        Self {
            still_duration,
            mindful_duration,
            interrupt_duration,
        }
    }

    /// Duration for a single signal kind
    pub fn get(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Still => self.still_duration,
            SignalKind::Mindful => self.mindful_duration,
            SignalKind::Interrupt => self.interrupt_duration,
        }
    }

    /// Replace the duration for a single signal kind
    pub fn set(&mut self, kind: SignalKind, seconds: f64) {
        match kind {
            SignalKind::Still => self.still_duration = seconds,
            SignalKind::Mindful => self.mindful_duration = seconds,
            SignalKind::Interrupt => self.interrupt_duration = seconds,
        }
    }

    /// Whether every signal lies within a single day (0 to 86400 seconds)
    pub fn within_one_day(&self) -> bool {
        SignalKind::ALL
            .iter()
            .all(|kind| (0.0..=SECONDS_PER_DAY).contains(&self.get(*kind)))
    }
}

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(value: &str) -> Result<NaiveDate, FocusError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| FocusError::DateParseError(format!("{value}: {e}")))
}

/// One calendar day of already-collected signals, as read from a day log.
///
/// ```json
/// { "date": "2024-01-15", "still": 3600, "mindful": 600, "interrupt": 120 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    #[serde(default, alias = "still_duration")]
    pub still: f64,
    #[serde(default, alias = "mindful_duration")]
    pub mindful: f64,
    #[serde(default, alias = "interrupt_duration")]
    pub interrupt: f64,
}

impl DayRecord {
    pub fn new(date: NaiveDate, signals: SignalDurations) -> Self {
        Self {
            date,
            still: signals.still_duration,
            mindful: signals.mindful_duration,
            interrupt: signals.interrupt_duration,
        }
    }

    /// Parse a single record
    pub fn from_json(json: &str) -> Result<Self, FocusError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse newline-delimited records, skipping blank lines
    pub fn parse_ndjson(input: &str) -> Result<Vec<Self>, FocusError> {
        input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(Self::from_json)
            .collect()
    }

    /// Parse a JSON array of records
    pub fn parse_array(input: &str) -> Result<Vec<Self>, FocusError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn signals(&self) -> SignalDurations {
        SignalDurations::new(self.still, self.mindful, self.interrupt)
    }
}

/// Whole minutes of estimated focus. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusMinutes(pub u64);

impl FocusMinutes {
    pub const ZERO: FocusMinutes = FocusMinutes(0);

    pub fn get(self) -> u64 {
        self.0
    }

    /// Focus time expressed in seconds
    pub fn as_seconds(self) -> f64 {
        self.0 as f64 * 60.0
    }
}

impl From<FocusMinutes> for u64 {
    fn from(minutes: FocusMinutes) -> Self {
        minutes.0
    }
}

impl fmt::Display for FocusMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.0)
    }
}

/// Every intermediate value of a single focus computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    /// still_duration * still_weight
    pub still_contribution: f64,
    /// mindful_duration * mindful_weight
    pub mindful_contribution: f64,
    /// interrupt_duration * interrupt_penalty (subtracted)
    pub interrupt_penalty: f64,
    /// Weighted sum before clamping, may be negative
    pub raw_seconds: f64,
    /// Weighted sum after clamping at zero
    pub clamped_seconds: f64,
    /// Final quantized result
    pub focus_minutes: FocusMinutes,
}

/// Summary of one day of focus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFocus {
    pub date: NaiveDate,
    /// Total focus time in seconds
    pub total_focus_time: f64,
    pub pickup_count: u32,
    /// Longest continuous session in seconds
    pub longest_session: f64,
    /// Fraction of signals that were available (0-1)
    pub data_quality: f64,
}

/// A recorded focus session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Duration in seconds
    pub duration: f64,
    pub data_sources: Vec<String>,
}

impl FocusSession {
    /// Create a session with a freshly generated id
    pub fn new(date: NaiveDate, duration: f64, data_sources: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            duration,
            data_sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_kind_serialization() {
        let json = serde_json::to_string(&SignalKind::Interrupt).unwrap();
        assert_eq!(json, "\"interrupt\"");

        let parsed: SignalKind = serde_json::from_str("\"mindful\"").unwrap();
        assert_eq!(parsed, SignalKind::Mindful);
    }

    #[test]
    fn test_signal_durations_short_aliases() {
        let json = r#"{ "still": 3600.0, "mindful": 600, "interrupt": 120.5 }"#;
        let signals: SignalDurations = serde_json::from_str(json).unwrap();

        assert_eq!(signals.still_duration, 3600.0);
        assert_eq!(signals.mindful_duration, 600.0);
        assert_eq!(signals.interrupt_duration, 120.5);
    }

    #[test]
    fn test_signal_durations_missing_fields_default_to_zero() {
        let signals: SignalDurations = serde_json::from_str(r#"{ "still_duration": 60 }"#).unwrap();
        assert_eq!(signals, SignalDurations::new(60.0, 0.0, 0.0));
    }

    #[test]
    fn test_get_and_set_by_kind() {
        let mut signals = SignalDurations::default();
        signals.set(SignalKind::Mindful, 900.0);

        assert_eq!(signals.get(SignalKind::Mindful), 900.0);
        assert_eq!(signals.get(SignalKind::Still), 0.0);
    }

    #[test]
    fn test_within_one_day() {
        assert!(SignalDurations::new(86_400.0, 0.0, 10.0).within_one_day());
        assert!(!SignalDurations::new(86_401.0, 0.0, 0.0).within_one_day());
        assert!(!SignalDurations::new(0.0, -1.0, 0.0).within_one_day());
    }

    #[test]
    fn test_focus_minutes_display_and_seconds() {
        let minutes = FocusMinutes(48);
        assert_eq!(minutes.to_string(), "48 min");
        assert_eq!(minutes.as_seconds(), 2880.0);
        assert_eq!(serde_json::to_string(&minutes).unwrap(), "48");
    }

    #[test]
    fn test_day_record_ndjson() {
        let input = r#"
            { "date": "2024-01-15", "still": 3600, "mindful": 600, "interrupt": 120 }

            { "date": "2024-01-16", "still_duration": 1800 }
        "#;

        let records = DayRecord::parse_ndjson(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].signals(), SignalDurations::new(3600.0, 600.0, 120.0));
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        assert_eq!(records[1].signals(), SignalDurations::new(1800.0, 0.0, 0.0));
    }

    #[test]
    fn test_day_record_bad_date() {
        let result = DayRecord::from_json(r#"{ "date": "2024-13-45", "still": 1 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert!(matches!(
            parse_date("15/01/2024"),
            Err(FocusError::DateParseError(_))
        ));
    }

    #[test]
    fn test_day_record_array() {
        let json = r#"[{ "date": "2024-01-15" }, { "date": "2024-01-16" }]"#;
        let records = DayRecord::parse_array(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].signals(), SignalDurations::default());
    }

    #[test]
    fn test_focus_session_ids_are_unique() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let a = FocusSession::new(date, 1800.0, vec!["still".to_string()]);
        let b = FocusSession::new(date, 1800.0, vec!["still".to_string()]);
        assert_ne!(a.id, b.id);
    }
}
