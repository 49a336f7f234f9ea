//! Trend classification
//!
//! Labels each health dimension (heart, sleep, activity) as improving,
//! stable, or declining over a chronologically ordered window. The window is
//! split at its midpoint; each half is averaged and the percentage change
//! between halves is classified against a symmetric threshold.
//!
//! Heart health combines two sub-signals. A falling resting heart rate is a
//! good sign and a rising HRV is a good sign, so the two raw directions are
//! resolved through a tie-break table rather than averaged: mixed or
//! ambiguous movements land on stable.
//!
//! Activity combines training minutes with steps scaled down by 100 — a
//! magnitude normalization so a 10,000-step day does not drown a 40-minute
//! workout in the composite, not a unit conversion.

use crate::models::{DailyHealthMetrics, Trend, TrendSummary};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Divisor applied to steps before combining with training minutes
const STEPS_SCALE: f64 = 100.0;

/// Tunable trend policy
///
/// The 5% change threshold is carried over from the source system for
/// compatibility; it is a policy constant, not a clinically derived value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Absolute percentage change beyond which a dimension moves off stable
    pub change_threshold_pct: f64,

    /// Minimum window length; shorter windows are unconditionally stable
    pub min_entries: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        TrendConfig {
            change_threshold_pct: 5.0,
            min_entries: 14,
        }
    }
}

/// Classifies trends over historical metric windows
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Analyzer with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyzer with an explicit config
    pub fn with_config(config: TrendConfig) -> Self {
        TrendAnalyzer { config }
    }

    /// Classify all three dimensions over a chronologically ordered window.
    ///
    /// Windows shorter than the configured minimum yield all-stable
    /// regardless of content.
    pub fn summarize(&self, window: &[DailyHealthMetrics]) -> TrendSummary {
        if window.len() < self.config.min_entries {
            debug!(
                entries = window.len(),
                minimum = self.config.min_entries,
                "window too short for trend analysis"
            );
            return TrendSummary::all_stable();
        }

        let summary = TrendSummary {
            heart: self.heart_trend(window),
            sleep: self.sleep_trend(window),
            activity: self.activity_trend(window),
        };

        debug!(
            heart = %summary.heart,
            sleep = %summary.sleep,
            activity = %summary.activity,
            "trend window classified"
        );

        summary
    }

    /// Combined resting-heart-rate / HRV signal.
    ///
    /// `raw_direction` reports whether the underlying value rose or fell, so
    /// a falling resting heart rate shows as `Declining` here and counts as
    /// the good case.
    fn heart_trend(&self, window: &[DailyHealthMetrics]) -> Trend {
        let rhr = self.raw_direction(window, |m| m.metrics.resting_heart_rate);
        let hrv = self.raw_direction(window, |m| m.metrics.heart_rate_variability);

        match (rhr, hrv) {
            (Trend::Declining, Trend::Stable) | (Trend::Declining, Trend::Improving) => {
                Trend::Improving
            }
            (Trend::Stable, Trend::Improving) => Trend::Improving,
            (Trend::Improving, Trend::Stable) | (Trend::Improving, Trend::Declining) => {
                Trend::Declining
            }
            (Trend::Stable, Trend::Declining) => Trend::Declining,
            // Both stable, or both moving in the same ambiguous direction
            _ => Trend::Stable,
        }
    }

    /// Composite of deep %, REM %, and consistency.
    fn sleep_trend(&self, window: &[DailyHealthMetrics]) -> Trend {
        self.raw_direction(window, |m| {
            (m.metrics.deep_sleep_pct + m.metrics.rem_sleep_pct + m.metrics.sleep_consistency)
                / 3.0
        })
    }

    /// Composite of training minutes and scaled steps.
    fn activity_trend(&self, window: &[DailyHealthMetrics]) -> Trend {
        self.raw_direction(window, |m| {
            (m.metrics.training_minutes_per_day + m.metrics.daily_steps as f64 / STEPS_SCALE)
                / 2.0
        })
    }

    /// Direction of the raw value extracted by `field` across the two halves.
    fn raw_direction(
        &self,
        window: &[DailyHealthMetrics],
        field: impl Fn(&DailyHealthMetrics) -> f64,
    ) -> Trend {
        let values: Vec<f64> = window.iter().map(field).collect();
        let (older, newer) = half_averages(&values);
        self.classify_change(percent_change(older, newer))
    }

    fn classify_change(&self, change_pct: f64) -> Trend {
        if change_pct > self.config.change_threshold_pct {
            Trend::Improving
        } else if change_pct < -self.config.change_threshold_pct {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Percentage change from `old` to `new`; zero baseline reads as no change.
fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        0.0
    } else {
        (new - old) / old * 100.0
    }
}

/// Average of the older (first) and newer (second) halves of a window.
///
/// Odd-length windows give the extra element to the newer half.
fn half_averages(values: &[f64]) -> (f64, f64) {
    let mid = values.len() / 2;
    (mean(&values[..mid]), mean(&values[mid..]))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
