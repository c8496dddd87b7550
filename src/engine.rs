//! Focus detection engine
//!
//! Composition root that resolves the three signal providers for a day and
//! feeds the results to the calculator. Providers are injected explicitly so the
//! engine and its callers can be tested in isolation.
//!
//! Each provider's duration is routed by its own [`SignalProvider::kind`], not by
//! the constructor slot it was passed in. A provider that fails, or a signal no
//! provider covers, contributes zero seconds; the engine itself never fails.

use crate::calculator::FocusScoreCalculator;
use crate::config::WeightConfiguration;
use crate::encoder::FocusReportEncoder;
use crate::error::FocusError;
use crate::providers::{PlaceholderMindfulProvider, SignalProvider};
use crate::types::{DailyFocus, DayRecord, FocusMinutes, FocusSession, SignalDurations, SignalKind};
use chrono::{Local, NaiveDate};

/// Signals resolved for one day, with the kinds that had to be zeroed
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSignals {
    pub date: NaiveDate,
    pub signals: SignalDurations,
    /// Signals whose provider failed and were replaced by zero
    pub unavailable: Vec<SignalKind>,
}

impl ResolvedSignals {
    /// Treat an already-collected record as fully available
    pub fn from_record(record: &DayRecord) -> Self {
        Self {
            date: record.date,
            signals: record.signals(),
            unavailable: Vec::new(),
        }
    }

    /// Fraction of signals that resolved (0-1)
    pub fn data_quality(&self) -> f64 {
        let total = SignalKind::ALL.len();
        (total - self.unavailable.len()) as f64 / total as f64
    }

    /// Names of the signals that resolved, in evaluation order
    pub fn available_sources(&self) -> Vec<String> {
        SignalKind::ALL
            .iter()
            .filter(|kind| !self.unavailable.contains(kind))
            .map(|kind| kind.as_str().to_string())
            .collect()
    }
}

/// Gathers signals from injected providers and computes focus minutes
pub struct FocusDetectionEngine {
    still: Box<dyn SignalProvider>,
    mindful: Box<dyn SignalProvider>,
    interrupt: Box<dyn SignalProvider>,
    calculator: FocusScoreCalculator,
}

impl FocusDetectionEngine {
    /// Create an engine with default weights
    pub fn new(
        still: Box<dyn SignalProvider>,
        mindful: Box<dyn SignalProvider>,
        interrupt: Box<dyn SignalProvider>,
    ) -> Self {
        for (slot, provider) in [
            (SignalKind::Still, &still),
            (SignalKind::Mindful, &mindful),
            (SignalKind::Interrupt, &interrupt),
        ] {
            let kind = provider.kind();
            if kind != slot {
                log::warn!("{kind} provider passed as the {slot} provider, routing it as {kind}");
            }
        }

        Self {
            still,
            mindful,
            interrupt,
            calculator: FocusScoreCalculator::default(),
        }
    }

    /// Create an engine whose mindfulness signal comes from the zero placeholder
    pub fn with_placeholder_mindful(
        still: Box<dyn SignalProvider>,
        interrupt: Box<dyn SignalProvider>,
    ) -> Self {
        Self::new(still, Box::new(PlaceholderMindfulProvider), interrupt)
    }

    /// Replace the weight configuration
    pub fn with_weights(mut self, weights: WeightConfiguration) -> Self {
        self.calculator = FocusScoreCalculator::new(weights);
        self
    }

    pub fn calculator(&self) -> &FocusScoreCalculator {
        &self.calculator
    }

    /// Resolve all three providers for a day, zeroing any that fail
    pub fn resolve_on(&self, date: NaiveDate) -> ResolvedSignals {
        let mut signals = SignalDurations::default();
        let mut resolved = Vec::new();
        let mut unavailable = Vec::new();

        for provider in [&self.still, &self.mindful, &self.interrupt] {
            let kind = provider.kind();
            if resolved.contains(&kind) {
                log::warn!("duplicate {kind} provider ignored for {date}");
                continue;
            }
            match provider.duration_on(date) {
                Ok(seconds) => {
                    signals.set(kind, seconds);
                    resolved.push(kind);
                }
                Err(e) => {
                    log::warn!("{kind} provider failed for {date}, using 0s: {e}");
                    unavailable.push(kind);
                }
            }
        }

        for kind in SignalKind::ALL {
            if !resolved.contains(&kind) && !unavailable.contains(&kind) {
                log::warn!("no {kind} provider configured, using 0s");
                unavailable.push(kind);
            }
        }
        unavailable.sort();

        ResolvedSignals {
            date,
            signals,
            unavailable,
        }
    }

    /// Signal durations for a day
    pub fn signals_on(&self, date: NaiveDate) -> SignalDurations {
        self.resolve_on(date).signals
    }

    /// Focus minutes for a day
    pub fn focus_minutes_on(&self, date: NaiveDate) -> FocusMinutes {
        self.calculator.compute_minutes(&self.signals_on(date))
    }

    /// Focus minutes for the current local calendar day
    pub fn today_focus_minutes(&self) -> FocusMinutes {
        self.focus_minutes_on(Local::now().date_naive())
    }

    /// Daily summary record.
    ///
    /// No collector supplies pickups or session lengths, so those stay zero.
    pub fn daily_focus_on(&self, date: NaiveDate) -> DailyFocus {
        let resolved = self.resolve_on(date);
        let minutes = self.calculator.compute_minutes(&resolved.signals);

        DailyFocus {
            date,
            total_focus_time: minutes.as_seconds(),
            pickup_count: 0,
            longest_session: 0.0,
            data_quality: resolved.data_quality(),
        }
    }

    /// A focus session record for a day, listing the sources that contributed
    pub fn session_on(&self, date: NaiveDate) -> FocusSession {
        let resolved = self.resolve_on(date);
        let minutes = self.calculator.compute_minutes(&resolved.signals);
        FocusSession::new(date, minutes.as_seconds(), resolved.available_sources())
    }

    /// JSON report for a day
    pub fn report_json_on(
        &self,
        date: NaiveDate,
        encoder: &FocusReportEncoder,
    ) -> Result<String, FocusError> {
        encoder.encode_to_json(&self.resolve_on(date), &self.calculator)
    }
}

/// Convert one day record JSON into a focus report JSON (stateless, one-shot).
///
/// # Example
/// ```ignore
/// let report = day_record_to_report(r#"{"date":"2024-01-15","still":3600}"#.to_string())?;
/// ```
pub fn day_record_to_report(record_json: String) -> Result<String, FocusError> {
    let record = DayRecord::from_json(&record_json)?;
    let resolved = ResolvedSignals::from_record(&record);

    let encoder = FocusReportEncoder::new();
    encoder.encode_to_json(&resolved, &FocusScoreCalculator::default())
}
