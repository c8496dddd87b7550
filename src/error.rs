//! Error types for Focus Flux
//!
//! The focus calculation itself never fails. These errors only surface from
//! configuration loading, record parsing, report encoding and signal providers.

use crate::types::SignalKind;
use thiserror::Error;

/// Errors that can occur around the computation (never inside it)
#[derive(Debug, Error)]
pub enum FocusError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid weight configuration: {0}")]
    InvalidWeights(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors reported by a signal provider.
///
/// The engine absorbs these by substituting zero for the affected signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("{0} signal is unavailable")]
    Unavailable(SignalKind),

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Provider failed: {0}")]
    Failed(String),
}
