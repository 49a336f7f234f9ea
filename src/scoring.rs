//! Metric scorers
//!
//! Nine pure functions, one per raw metric, each mapping a numeric input to a
//! [`ScoringResult`] through its table in [`crate::thresholds`]. All scorers
//! share the same contract:
//!
//! - points are a monotonic step function of the value in the healthy
//!   direction (lower is better for resting heart rate, higher for the rest)
//! - a value of zero, or below the table's minimum meaningful reading,
//!   returns a 0-point "no data" result, distinguishable from a genuinely
//!   poor but present reading
//! - out-of-range extremes clamp to the best or worst tier; no scorer errors

use crate::models::ScoringResult;
use crate::thresholds::{self, Direction, MetricThresholds};

/// Match a raw value against a threshold table.
///
/// Walks the tiers best-first and returns the first inclusive match; a
/// present reading worse than every tier gets the table's floor award.
pub fn score_against(table: &MetricThresholds, value: f64) -> ScoringResult {
    if value < table.min_meaningful {
        return ScoringResult {
            points: 0,
            reason: table.no_data_reason.to_string(),
        };
    }

    for tier in table.tiers {
        let matched = match table.direction {
            Direction::LowerBetter => value <= tier.boundary,
            Direction::HigherBetter => value >= tier.boundary,
        };
        if matched {
            return ScoringResult {
                points: tier.points,
                reason: tier.reason.to_string(),
            };
        }
    }

    ScoringResult {
        points: table.floor_points,
        reason: table.floor_reason.to_string(),
    }
}

/// Score resting heart rate in bpm (lower is better)
pub fn score_resting_heart_rate(bpm: f64) -> ScoringResult {
    score_against(&thresholds::RESTING_HEART_RATE, bpm)
}

/// Score heart rate variability in milliseconds
pub fn score_heart_rate_variability(sdnn_ms: f64) -> ScoringResult {
    score_against(&thresholds::HEART_RATE_VARIABILITY, sdnn_ms)
}

/// Score VO2max in ml/kg/min
pub fn score_vo2_max(ml_kg_min: f64) -> ScoringResult {
    score_against(&thresholds::VO2_MAX, ml_kg_min)
}

/// Score deep sleep as a percentage of total sleep
pub fn score_deep_sleep(pct: f64) -> ScoringResult {
    score_against(&thresholds::DEEP_SLEEP, pct)
}

/// Score REM sleep as a percentage of total sleep
pub fn score_rem_sleep(pct: f64) -> ScoringResult {
    score_against(&thresholds::REM_SLEEP, pct)
}

/// Score the 0-100 sleep consistency value
pub fn score_sleep_consistency(consistency: f64) -> ScoringResult {
    score_against(&thresholds::SLEEP_CONSISTENCY, consistency)
}

/// Score training time in the canonical minutes-per-day unit
pub fn score_training_time(minutes_per_day: f64) -> ScoringResult {
    score_against(&thresholds::TRAINING_TIME, minutes_per_day)
}

/// Score training intensity (0-100)
pub fn score_training_intensity(intensity: f64) -> ScoringResult {
    score_against(&thresholds::TRAINING_INTENSITY, intensity)
}

/// Score the daily step count
pub fn score_daily_steps(steps: u32) -> ScoringResult {
    score_against(&thresholds::DAILY_STEPS, steps as f64)
}
