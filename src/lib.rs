//! Focus Flux - On-device focus time estimation
//!
//! Flux estimates a day's focus time from three independently measured signals:
//! sustained device stillness, recorded mindfulness, and notification
//! interruptions. The signals are weighted, combined, clamped at zero and
//! truncated to whole minutes:
//!
//! ```text
//! minutes = floor(max(0, still * 0.8 + mindful * 1.0 - interrupt * 2.0) / 60)
//! ```
//!
//! ## Modules
//!
//! - **Calculator**: the pure, total focus computation
//! - **Engine**: resolves injected signal providers for a day and feeds the calculator
//! - **Encoder**: renders a day's result as a JSON report

pub mod calculator;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod providers;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use calculator::{compute_focus_minutes, FocusScoreCalculator};
pub use config::WeightConfiguration;
pub use engine::{day_record_to_report, FocusDetectionEngine, ResolvedSignals};
pub use error::{FocusError, ProviderError};
pub use providers::SignalProvider;
pub use types::{DailyFocus, DayRecord, FocusMinutes, FocusSession, SignalDurations, SignalKind};

/// Flux version embedded in all reports
pub const FLUX_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "focus-flux";
