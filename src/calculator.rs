//! Focus score calculation
//!
//! Combines the three daily signal durations into whole minutes of focus:
//!
//! ```text
//! raw     = still * still_weight + mindful * mindful_weight - interrupt * interrupt_penalty
//! minutes = floor(max(0, raw) / 60)
//! ```
//!
//! The calculation is total: any input, including negative, oversized or NaN
//! durations, yields a non-negative minute count.

use crate::config::WeightConfiguration;
use crate::types::{FocusMinutes, SignalBreakdown, SignalDurations};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Compute focus minutes from raw signal durations (seconds).
///
/// # Example
/// ```
/// use focus_flux::{compute_focus_minutes, WeightConfiguration};
///
/// let minutes = compute_focus_minutes(1800.0, 1800.0, 300.0, &WeightConfiguration::DEFAULT);
/// assert_eq!(minutes, 44);
/// ```
pub fn compute_focus_minutes(
    still_duration: f64,
    mindful_duration: f64,
    interrupt_duration: f64,
    weights: &WeightConfiguration,
) -> u64 {
    FocusScoreCalculator::new(*weights)
        .compute_minutes(&SignalDurations::new(
            still_duration,
            mindful_duration,
            interrupt_duration,
        ))
        .get()
}

/// Stateless focus calculator bound to a weight configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FocusScoreCalculator {
    weights: WeightConfiguration,
}

impl FocusScoreCalculator {
    pub fn new(weights: WeightConfiguration) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &WeightConfiguration {
        &self.weights
    }

    /// Quantized focus minutes for one day's signals
    pub fn compute_minutes(&self, signals: &SignalDurations) -> FocusMinutes {
        self.breakdown(signals).focus_minutes
    }

    /// Full breakdown of the weighted combination
    pub fn breakdown(&self, signals: &SignalDurations) -> SignalBreakdown {
        let still_contribution = signals.still_duration * self.weights.still_weight;
        let mindful_contribution = signals.mindful_duration * self.weights.mindful_weight;
        let interrupt_penalty = signals.interrupt_duration * self.weights.interrupt_penalty;

        let raw_seconds = still_contribution + mindful_contribution - interrupt_penalty;
        // f64::max discards NaN, so an undefined sum clamps to zero
        let clamped_seconds = raw_seconds.max(0.0);
        let focus_minutes = quantize_minutes(clamped_seconds);

        log::debug!(
            "focus: still={} mindful={} interrupt={} raw={:.1}s -> {}",
            signals.still_duration,
            signals.mindful_duration,
            signals.interrupt_duration,
            raw_seconds,
            focus_minutes
        );

        SignalBreakdown {
            still_contribution,
            mindful_contribution,
            interrupt_penalty,
            raw_seconds,
            clamped_seconds,
            focus_minutes,
        }
    }
}

/// Truncate non-negative seconds to whole minutes.
///
/// Float-to-int casts saturate, so infinite input maps to `u64::MAX`.
fn quantize_minutes(clamped_seconds: f64) -> FocusMinutes {
    FocusMinutes((clamped_seconds / SECONDS_PER_MINUTE) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_minutes(still: f64, mindful: f64, interrupt: f64) -> u64 {
        compute_focus_minutes(still, mindful, interrupt, &WeightConfiguration::DEFAULT)
    }

    #[test]
    fn test_zero_input() {
        assert_eq!(default_minutes(0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_interrupts_only_clamp_to_zero() {
        // raw = -200
        assert_eq!(default_minutes(0.0, 0.0, 100.0), 0);
    }

    #[test]
    fn test_one_hour_still() {
        // raw = 3600 * 0.8 = 2880 seconds
        assert_eq!(default_minutes(3600.0, 0.0, 0.0), 48);
    }

    #[test]
    fn test_weighted_combination() {
        // 1800*0.8 + 1800*1.0 - 300*2.0 = 2640 seconds
        assert_eq!(default_minutes(1800.0, 1800.0, 300.0), 44);
    }

    #[test]
    fn test_quantization_truncates() {
        // 119 seconds of mindfulness is one whole minute
        assert_eq!(default_minutes(0.0, 119.0, 0.0), 1);
        assert_eq!(default_minutes(0.0, 59.9, 0.0), 0);
    }

    #[test]
    fn test_exact_balance_is_zero() {
        // 1000*0.8 + 200*1.0 = 1000 = 500*2.0
        assert_eq!(default_minutes(1000.0, 200.0, 500.0), 0);
    }

    #[test]
    fn test_negative_inputs_participate() {
        // 3600*0.8 - 600 = 2280 seconds
        assert_eq!(default_minutes(3600.0, -600.0, 0.0), 38);
        // negative interrupt adds time
        assert_eq!(default_minutes(0.0, 0.0, -60.0), 2);
    }

    #[test]
    fn test_non_finite_inputs_never_fail() {
        assert_eq!(default_minutes(f64::NAN, 0.0, 0.0), 0);
        assert_eq!(default_minutes(0.0, 0.0, f64::INFINITY), 0);
        assert_eq!(default_minutes(f64::INFINITY, 0.0, 0.0), u64::MAX);
        // inf - inf is NaN
        assert_eq!(default_minutes(f64::INFINITY, 0.0, f64::INFINITY), 0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = WeightConfiguration {
            still_weight: 1.0,
            mindful_weight: 0.5,
            interrupt_penalty: 1.0,
            ..WeightConfiguration::DEFAULT
        };
        // 600 + 300 - 300 = 600 seconds
        assert_eq!(compute_focus_minutes(600.0, 600.0, 300.0, &weights), 10);
    }

    #[test]
    fn test_minimum_focus_duration_is_not_applied() {
        // 600 seconds is below the 1800 second minimum but still reported
        assert_eq!(default_minutes(0.0, 600.0, 0.0), 10);
    }

    #[test]
    fn test_breakdown_components() {
        let calculator = FocusScoreCalculator::default();
        let breakdown = calculator.breakdown(&SignalDurations::new(1800.0, 1800.0, 300.0));

        assert!((breakdown.still_contribution - 1440.0).abs() < 1e-9);
        assert!((breakdown.mindful_contribution - 1800.0).abs() < 1e-9);
        assert!((breakdown.interrupt_penalty - 600.0).abs() < 1e-9);
        assert!((breakdown.raw_seconds - 2640.0).abs() < 1e-9);
        assert_eq!(breakdown.clamped_seconds, breakdown.raw_seconds);
        assert_eq!(breakdown.focus_minutes, FocusMinutes(44));
    }

    #[test]
    fn test_breakdown_keeps_negative_raw() {
        let breakdown =
            FocusScoreCalculator::default().breakdown(&SignalDurations::new(0.0, 0.0, 100.0));
        assert_eq!(breakdown.raw_seconds, -200.0);
        assert_eq!(breakdown.clamped_seconds, 0.0);
        assert_eq!(breakdown.focus_minutes, FocusMinutes::ZERO);
    }

    proptest! {
        #[test]
        fn prop_result_fits_day_budget(
            still in 0.0f64..=86_400.0,
            mindful in 0.0f64..=86_400.0,
            interrupt in 0.0f64..=86_400.0,
        ) {
            // (0.8 + 1.0) * 86400 / 60 = 2592
            prop_assert!(default_minutes(still, mindful, interrupt) <= 2592);
        }

        #[test]
        fn prop_more_still_never_decreases(
            still in 0.0f64..=86_400.0,
            extra in 0.0f64..=86_400.0,
            mindful in 0.0f64..=86_400.0,
            interrupt in 0.0f64..=86_400.0,
        ) {
            prop_assert!(
                default_minutes(still + extra, mindful, interrupt)
                    >= default_minutes(still, mindful, interrupt)
            );
        }

        #[test]
        fn prop_more_mindful_never_decreases(
            still in 0.0f64..=86_400.0,
            mindful in 0.0f64..=86_400.0,
            extra in 0.0f64..=86_400.0,
            interrupt in 0.0f64..=86_400.0,
        ) {
            prop_assert!(
                default_minutes(still, mindful + extra, interrupt)
                    >= default_minutes(still, mindful, interrupt)
            );
        }

        #[test]
        fn prop_more_interrupt_never_increases(
            still in 0.0f64..=86_400.0,
            mindful in 0.0f64..=86_400.0,
            interrupt in 0.0f64..=86_400.0,
            extra in 0.0f64..=86_400.0,
        ) {
            prop_assert!(
                default_minutes(still, mindful, interrupt + extra)
                    <= default_minutes(still, mindful, interrupt)
            );
        }

        #[test]
        fn prop_penalty_dominates_gives_zero(
            still in 0.0f64..=86_400.0,
            mindful in 0.0f64..=86_400.0,
        ) {
            // interrupt large enough that interrupt * 2.0 >= still * 0.8 + mindful
            let interrupt = (still * 0.8 + mindful) / 2.0 + 1.0;
            prop_assert_eq!(default_minutes(still, mindful, interrupt), 0);
        }

        #[test]
        fn prop_idempotent(
            still in -86_400.0f64..=86_400.0,
            mindful in -86_400.0f64..=86_400.0,
            interrupt in -86_400.0f64..=86_400.0,
        ) {
            prop_assert_eq!(
                default_minutes(still, mindful, interrupt),
                default_minutes(still, mindful, interrupt)
            );
        }
    }
}
