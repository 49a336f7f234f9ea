//! Sleep aggregation and the sleep-consistency estimator
//!
//! # Consistency score
//!
//! Sleep consistency measures how regular nightly sleep duration is across a
//! window. The score is derived from the population standard deviation of
//! nightly durations:
//!
//! ```notrust
//! consistency = max(0, 100 - stddev_hours * 20)
//! ```
//!
//! A perfectly regular sleeper (zero variance) scores 100; each hour of
//! standard deviation costs 20 points. The estimator is shared by the live
//! path and the historical path; the historical aggregator computes it once
//! across the whole window and applies the same value to every day rather
//! than recomputing per day.

use crate::models::{SleepStage, SleepStageSample};
use statrs::statistics::Statistics;

/// Points of consistency lost per hour of duration standard deviation
const STD_DEV_PENALTY_PER_HOUR: f64 = 20.0;

/// Mean and spread of nightly sleep durations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepDurationStats {
    /// Arithmetic mean duration in hours
    pub mean_hours: f64,

    /// Population standard deviation in hours
    pub std_dev_hours: f64,

    /// Number of nights that contributed
    pub nights: usize,
}

/// Compute duration statistics over a set of nightly durations (hours).
///
/// An empty input yields zero stats; callers never see NaN.
pub fn duration_stats(durations: &[f64]) -> SleepDurationStats {
    if durations.is_empty() {
        return SleepDurationStats {
            mean_hours: 0.0,
            std_dev_hours: 0.0,
            nights: 0,
        };
    }

    SleepDurationStats {
        mean_hours: durations.iter().mean(),
        std_dev_hours: durations.iter().population_std_dev(),
        nights: durations.len(),
    }
}

/// Convert nightly durations to the 0-100 consistency score.
///
/// The empty window is the degenerate zero-variance case and scores 100.
pub fn consistency_score(durations: &[f64]) -> f64 {
    let stats = duration_stats(durations);
    (100.0 - stats.std_dev_hours * STD_DEV_PENALTY_PER_HOUR).max(0.0)
}

/// Stage-by-stage totals for one night
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SleepTotals {
    /// Hours asleep (deep + light + REM; awake segments excluded)
    pub total_hours: f64,

    /// Hours of deep sleep
    pub deep_hours: f64,

    /// Hours of REM sleep
    pub rem_hours: f64,
}

impl SleepTotals {
    /// Deep sleep share of total sleep, 0 when no sleep was recorded
    pub fn deep_pct(&self) -> f64 {
        if self.total_hours <= 0.0 {
            0.0
        } else {
            self.deep_hours / self.total_hours * 100.0
        }
    }

    /// REM sleep share of total sleep, 0 when no sleep was recorded
    pub fn rem_pct(&self) -> f64 {
        if self.total_hours <= 0.0 {
            0.0
        } else {
            self.rem_hours / self.total_hours * 100.0
        }
    }
}

/// Sum a night's stage segments into total/deep/REM hours.
pub fn aggregate_stages(samples: &[SleepStageSample]) -> SleepTotals {
    let mut totals = SleepTotals::default();
    for sample in samples {
        let hours = sample.duration_hours();
        match sample.stage {
            SleepStage::Deep => {
                totals.deep_hours += hours;
                totals.total_hours += hours;
            }
            SleepStage::Rem => {
                totals.rem_hours += hours;
                totals.total_hours += hours;
            }
            SleepStage::Light => totals.total_hours += hours,
            SleepStage::Awake => {}
        }
    }
    totals
}
