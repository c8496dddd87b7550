//! Signal providers
//!
//! A provider supplies one signal's accumulated seconds for a calendar day. Real
//! collectors (health store, motion sensor, notification log) live outside this
//! crate; they plug in by implementing [`SignalProvider`].

use crate::error::ProviderError;
use crate::types::SignalKind;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Source of one signal's daily duration
pub trait SignalProvider: Send + Sync {
    /// Which signal this provider measures
    fn kind(&self) -> SignalKind;

    /// Accumulated seconds for the given calendar day
    fn duration_on(&self, date: NaiveDate) -> Result<f64, ProviderError>;
}

/// Provider returning the same duration for every day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProvider {
    kind: SignalKind,
    seconds: f64,
}

impl FixedProvider {
    pub fn new(kind: SignalKind, seconds: f64) -> Self {
        Self { kind, seconds }
    }
}

impl SignalProvider for FixedProvider {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    fn duration_on(&self, _date: NaiveDate) -> Result<f64, ProviderError> {
        Ok(self.seconds)
    }
}

/// Mindfulness provider without a health-store query behind it.
///
/// Always reports zero seconds. This is a missing collector, not a zero weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderMindfulProvider;

impl SignalProvider for PlaceholderMindfulProvider {
    fn kind(&self) -> SignalKind {
        SignalKind::Mindful
    }

    fn duration_on(&self, _date: NaiveDate) -> Result<f64, ProviderError> {
        Ok(0.0)
    }
}

/// Provider that can never deliver, e.g. after an authorization grant was refused
#[derive(Debug, Clone, PartialEq)]
pub struct UnavailableProvider {
    kind: SignalKind,
    reason: Option<String>,
}

impl UnavailableProvider {
    pub fn new(kind: SignalKind) -> Self {
        Self { kind, reason: None }
    }

    /// Unavailable because access was denied
    pub fn denied(kind: SignalKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: Some(reason.into()),
        }
    }
}

impl SignalProvider for UnavailableProvider {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    fn duration_on(&self, _date: NaiveDate) -> Result<f64, ProviderError> {
        match &self.reason {
            Some(reason) => Err(ProviderError::AuthorizationDenied(reason.clone())),
            None => Err(ProviderError::Unavailable(self.kind)),
        }
    }
}

/// In-memory per-day durations. Days without an entry report zero.
#[derive(Debug, Clone)]
pub struct DailyLogProvider {
    kind: SignalKind,
    days: HashMap<NaiveDate, f64>,
}

impl DailyLogProvider {
    pub fn new(kind: SignalKind) -> Self {
        Self {
            kind,
            days: HashMap::new(),
        }
    }

    /// Record (or replace) a day's duration
    pub fn record(&mut self, date: NaiveDate, seconds: f64) {
        self.days.insert(date, seconds);
    }

    /// Builder-style variant of [`record`](Self::record)
    pub fn with_day(mut self, date: NaiveDate, seconds: f64) -> Self {
        self.record(date, seconds);
        self
    }
}

impl SignalProvider for DailyLogProvider {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    fn duration_on(&self, date: NaiveDate) -> Result<f64, ProviderError> {
        Ok(self.days.get(&date).copied().unwrap_or(0.0))
    }
}
