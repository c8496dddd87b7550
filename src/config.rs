//! Weight configuration
//!
//! Coefficients are fixed per deployment. The compiled defaults are available
//! process-wide through [`WeightConfiguration::global`]; a deployment may instead
//! load its own set from JSON.

use crate::error::FocusError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default weight applied to device stillness
pub const DEFAULT_STILL_WEIGHT: f64 = 0.8;

/// Default weight applied to mindful minutes
pub const DEFAULT_MINDFUL_WEIGHT: f64 = 1.0;

/// Default penalty applied to interruption time
pub const DEFAULT_INTERRUPT_PENALTY: f64 = 2.0;

/// Default minimum focus duration in seconds (30 minutes)
pub const DEFAULT_MINIMUM_FOCUS_DURATION: f64 = 1800.0;

static DEFAULT_WEIGHTS: WeightConfiguration = WeightConfiguration::DEFAULT;

/// Coefficients for the focus aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfiguration {
    /// Multiplier for still duration
    pub still_weight: f64,
    /// Multiplier for mindful duration
    pub mindful_weight: f64,
    /// Multiplier for interrupt duration, subtracted from the sum
    pub interrupt_penalty: f64,
    /// Reserved. Carried and reported but not consulted by the aggregation.
    pub minimum_focus_duration: f64,
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl WeightConfiguration {
    pub const DEFAULT: WeightConfiguration = WeightConfiguration {
        still_weight: DEFAULT_STILL_WEIGHT,
        mindful_weight: DEFAULT_MINDFUL_WEIGHT,
        interrupt_penalty: DEFAULT_INTERRUPT_PENALTY,
        minimum_focus_duration: DEFAULT_MINIMUM_FOCUS_DURATION,
    };

    /// Process-wide read-only default weights
    pub fn global() -> &'static WeightConfiguration {
        &DEFAULT_WEIGHTS
    }

    /// Check that every coefficient is a finite number
    pub fn validate(&self) -> Result<(), FocusError> {
        let fields = [
            ("still_weight", self.still_weight),
            ("mindful_weight", self.mindful_weight),
            ("interrupt_penalty", self.interrupt_penalty),
            ("minimum_focus_duration", self.minimum_focus_duration),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(FocusError::InvalidWeights(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parse weights from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, FocusError> {
        let weights: WeightConfiguration = serde_json::from_str(json)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Load weights from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, FocusError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize weights to pretty JSON
    pub fn to_json(&self) -> Result<String, FocusError> {
        serde_json::to_string_pretty(self).map_err(FocusError::JsonError)
    }
}
