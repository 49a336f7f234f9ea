//! Historical aggregation
//!
//! Converts multi-day raw sample arrays from the health-data source into
//! per-day metric snapshots and daily fitness scores. Per day: step samples
//! are summed, heart-rate and HRV samples are arithmetic-meaned (0 when a
//! day has none), sleep-stage segments are summed into total/deep/REM hours
//! and converted to percentages, and the workout summary is looked up by
//! exact calendar date (0 time / 0 intensity when absent).
//!
//! Sleep consistency is computed once across the entire window and the same
//! value is applied to every day; it is not recomputed per rolling sub-window.
//!
//! Days with zero data across every source are dropped rather than scored as
//! zero; a day with only steps recorded still counts.

use crate::fitness::FitnessCalculator;
use crate::models::{
    DailyFitnessScore, DailyHealthMetrics, DailyRawSamples, HealthMetrics, WorkoutSummary,
};
use crate::sleep;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Builds per-day metrics and scores from raw sample bundles
#[derive(Debug, Clone, Default)]
pub struct HistoricalAggregator {
    calculator: FitnessCalculator,
}

impl HistoricalAggregator {
    /// Aggregator scoring with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator with an explicit calculator
    pub fn with_calculator(calculator: FitnessCalculator) -> Self {
        HistoricalAggregator { calculator }
    }

    /// Build one [`DailyHealthMetrics`] per input day.
    ///
    /// Every input day appears in the output, including all-zero days; the
    /// inclusion filter is applied by [`Self::daily_scores`]. Output order
    /// matches input order.
    pub fn daily_metrics(
        &self,
        days: &[DailyRawSamples],
        workouts: &[WorkoutSummary],
    ) -> Vec<DailyHealthMetrics> {
        let workouts_by_date: HashMap<NaiveDate, &WorkoutSummary> =
            workouts.iter().map(|w| (w.date, w)).collect();

        // One consistency value for the whole window, from nights that
        // actually recorded sleep
        let nightly_durations: Vec<f64> = days
            .iter()
            .map(|day| sleep::aggregate_stages(&day.sleep).total_hours)
            .filter(|hours| *hours > 0.0)
            .collect();
        let window_consistency = sleep::consistency_score(&nightly_durations);

        days.iter()
            .map(|day| {
                let steps: u32 = day.steps.iter().map(|s| s.count).sum();
                let resting_heart_rate = mean_or_zero(day.heart_rate.iter().map(|s| s.bpm));
                let heart_rate_variability = mean_or_zero(day.hrv.iter().map(|s| s.sdnn_ms));

                let totals = sleep::aggregate_stages(&day.sleep);
                let slept = totals.total_hours > 0.0;

                let (training_minutes, intensity) = match workouts_by_date.get(&day.date) {
                    Some(workout) => (workout.duration_minutes, workout.intensity),
                    None => (0.0, 0.0),
                };

                DailyHealthMetrics {
                    date: day.date,
                    metrics: HealthMetrics {
                        resting_heart_rate,
                        heart_rate_variability,
                        // VO2max has no per-day raw samples; it enters
                        // through the live snapshot path only
                        vo2_max: 0.0,
                        deep_sleep_pct: totals.deep_pct(),
                        rem_sleep_pct: totals.rem_pct(),
                        sleep_consistency: if slept { window_consistency } else { 0.0 },
                        training_minutes_per_day: training_minutes,
                        training_intensity: intensity,
                        daily_steps: steps,
                    },
                }
            })
            .collect()
    }

    /// Score each day and drop days with no underlying data.
    ///
    /// Returns surviving days most-recent-first.
    pub fn daily_scores(
        &self,
        days: &[DailyRawSamples],
        workouts: &[WorkoutSummary],
    ) -> Vec<DailyFitnessScore> {
        let metrics = self.daily_metrics(days, workouts);
        let total_days = metrics.len();

        let mut scores: Vec<DailyFitnessScore> = metrics
            .iter()
            .filter(|day| day.metrics.has_any_data())
            .map(|day| self.calculator.calculate_daily(day))
            .collect();

        scores.sort_by(|a, b| b.date.cmp(&a.date));

        debug!(
            total_days,
            scored_days = scores.len(),
            dropped = total_days - scores.len(),
            "historical aggregation complete"
        );

        scores
    }
}

fn mean_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        HeartRateSample, HrvSample, SleepStage, SleepStageSample, StepsSample,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn empty_day(day: u32) -> DailyRawSamples {
        DailyRawSamples {
            date: date(day),
            steps: Vec::new(),
            heart_rate: Vec::new(),
            hrv: Vec::new(),
            sleep: Vec::new(),
        }
    }

    fn steps_sample(count: u32) -> StepsSample {
        StepsSample {
            timestamp: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap(),
            count,
        }
    }

    fn sleep_night(deep_min: i64, light_min: i64, rem_min: i64) -> Vec<SleepStageSample> {
        let base = Utc.with_ymd_and_hms(2025, 5, 1, 23, 0, 0).unwrap();
        let mut cursor = base;
        let mut segments = Vec::new();
        for (stage, minutes) in [
            (SleepStage::Light, light_min),
            (SleepStage::Deep, deep_min),
            (SleepStage::Rem, rem_min),
        ] {
            if minutes > 0 {
                segments.push(SleepStageSample {
                    stage,
                    start: cursor,
                    end: cursor + Duration::minutes(minutes),
                });
                cursor += Duration::minutes(minutes);
            }
        }
        segments
    }

    #[test]
    fn test_day_aggregation() {
        let mut day = empty_day(1);
        day.steps = vec![steps_sample(4000), steps_sample(3500)];
        day.heart_rate = vec![
            HeartRateSample { timestamp: Utc::now(), bpm: 60.0 },
            HeartRateSample { timestamp: Utc::now(), bpm: 64.0 },
        ];
        day.hrv = vec![
            HrvSample { timestamp: Utc::now(), sdnn_ms: 48.0 },
            HrvSample { timestamp: Utc::now(), sdnn_ms: 52.0 },
        ];
        day.sleep = sleep_night(90, 240, 90); // 7h total

        let workouts = vec![WorkoutSummary {
            date: date(1),
            duration_minutes: 45.0,
            intensity: 80.0,
        }];

        let metrics = HistoricalAggregator::new().daily_metrics(&[day], &workouts);
        assert_eq!(metrics.len(), 1);

        let m = &metrics[0].metrics;
        assert_eq!(m.daily_steps, 7500);
        assert!((m.resting_heart_rate - 62.0).abs() < 1e-9);
        assert!((m.heart_rate_variability - 50.0).abs() < 1e-9);
        assert!((m.deep_sleep_pct - 21.428571).abs() < 1e-3);
        assert!((m.rem_sleep_pct - 21.428571).abs() < 1e-3);
        assert_eq!(m.training_minutes_per_day, 45.0);
        assert_eq!(m.training_intensity, 80.0);
        // Single night in the window, zero variance
        assert_eq!(m.sleep_consistency, 100.0);
    }

    #[test]
    fn test_workout_matched_by_exact_date_only() {
        let mut day = empty_day(2);
        day.steps = vec![steps_sample(5000)];

        // Workout on a different date must not leak into the day
        let workouts = vec![WorkoutSummary {
            date: date(3),
            duration_minutes: 60.0,
            intensity: 90.0,
        }];

        let metrics = HistoricalAggregator::new().daily_metrics(&[day], &workouts);
        assert_eq!(metrics[0].metrics.training_minutes_per_day, 0.0);
        assert_eq!(metrics[0].metrics.training_intensity, 0.0);
    }

    #[test]
    fn test_all_zero_days_are_dropped() {
        let mut active = empty_day(1);
        active.steps = vec![steps_sample(6000)];

        let days = vec![active, empty_day(2), empty_day(3)];
        let scores = HistoricalAggregator::new().daily_scores(&days, &[]);

        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].date, date(1));
    }

    #[test]
    fn test_steps_only_day_is_included() {
        let mut day = empty_day(1);
        day.steps = vec![steps_sample(9000)];

        let scores = HistoricalAggregator::new().daily_scores(&[day], &[]);
        assert_eq!(scores.len(), 1);
        // Steps score plus nothing else
        assert!(scores[0].activity_points > 0);
        assert_eq!(scores[0].cardiovascular_points, 0);
        assert_eq!(scores[0].recovery_points, 0);
    }

    #[test]
    fn test_output_sorted_most_recent_first() {
        let days: Vec<DailyRawSamples> = (1..=5)
            .map(|d| {
                let mut day = empty_day(d);
                day.steps = vec![steps_sample(4000 + d * 100)];
                day
            })
            .collect();

        let scores = HistoricalAggregator::new().daily_scores(&days, &[]);
        assert_eq!(scores.len(), 5);
        for pair in scores.windows(2) {
            assert!(pair[0].date > pair[1].date);
        }
        assert_eq!(scores[0].date, date(5));
    }

    #[test]
    fn test_window_consistency_shared_across_days() {
        // Two nights of 6h and 8h: mean 7h, stddev 1h, consistency 80
        let mut day1 = empty_day(1);
        day1.sleep = sleep_night(60, 240, 60); // 6h
        let mut day2 = empty_day(2);
        day2.sleep = sleep_night(120, 240, 120); // 8h

        let metrics = HistoricalAggregator::new().daily_metrics(&[day1, day2], &[]);
        assert!((metrics[0].metrics.sleep_consistency - 80.0).abs() < 1e-9);
        assert_eq!(
            metrics[0].metrics.sleep_consistency,
            metrics[1].metrics.sleep_consistency
        );
    }

    #[test]
    fn test_sleepless_day_gets_zero_consistency() {
        let mut slept = empty_day(1);
        slept.sleep = sleep_night(90, 240, 90);
        let mut sleepless = empty_day(2);
        sleepless.steps = vec![steps_sample(3000)];

        let metrics = HistoricalAggregator::new().daily_metrics(&[slept, sleepless], &[]);
        assert!(metrics[0].metrics.sleep_consistency > 0.0);
        assert_eq!(metrics[1].metrics.sleep_consistency, 0.0);
    }
}
