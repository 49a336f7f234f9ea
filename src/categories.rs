//! Category aggregators
//!
//! Three purely additive functions grouping the metric scorers into the
//! Cardiovascular Health, Recovery & Regeneration, and Activity & Training
//! buckets. Each invokes its three scorers, sums the points, and emits one
//! [`HistoryItem`] per metric. No aggregator performs cross-metric logic.

use crate::models::{HistoryItem, ScoreCategory};
use crate::scoring;
use crate::thresholds;

/// A category total plus the line items that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    /// Which bucket this is
    pub category: ScoreCategory,

    /// Sum of the three metric awards, never above the category ceiling
    pub total: u8,

    /// One item per underlying metric
    pub items: Vec<HistoryItem>,
}

/// Score the Cardiovascular Health category (max 30)
pub fn cardiovascular_points(
    resting_heart_rate: f64,
    heart_rate_variability: f64,
    vo2_max: f64,
) -> CategoryScore {
    let category = ScoreCategory::Cardiovascular;

    let rhr = scoring::score_resting_heart_rate(resting_heart_rate);
    let hrv = scoring::score_heart_rate_variability(heart_rate_variability);
    let vo2 = scoring::score_vo2_max(vo2_max);

    let total = rhr.points + hrv.points + vo2.points;
    let items = vec![
        HistoryItem::from_result(
            category,
            thresholds::RESTING_HEART_RATE.label,
            rhr,
            thresholds::RESTING_HEART_RATE.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::HEART_RATE_VARIABILITY.label,
            hrv,
            thresholds::HEART_RATE_VARIABILITY.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::VO2_MAX.label,
            vo2,
            thresholds::VO2_MAX.max_points,
        ),
    ];

    CategoryScore { category, total, items }
}

/// Score the Recovery & Regeneration category (max 35)
pub fn recovery_points(
    deep_sleep_pct: f64,
    rem_sleep_pct: f64,
    sleep_consistency: f64,
) -> CategoryScore {
    let category = ScoreCategory::Recovery;

    let deep = scoring::score_deep_sleep(deep_sleep_pct);
    let rem = scoring::score_rem_sleep(rem_sleep_pct);
    let consistency = scoring::score_sleep_consistency(sleep_consistency);

    let total = deep.points + rem.points + consistency.points;
    let items = vec![
        HistoryItem::from_result(
            category,
            thresholds::DEEP_SLEEP.label,
            deep,
            thresholds::DEEP_SLEEP.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::REM_SLEEP.label,
            rem,
            thresholds::REM_SLEEP.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::SLEEP_CONSISTENCY.label,
            consistency,
            thresholds::SLEEP_CONSISTENCY.max_points,
        ),
    ];

    CategoryScore { category, total, items }
}

/// Score the Activity & Training category (max 30)
pub fn activity_points(
    training_minutes_per_day: f64,
    training_intensity: f64,
    daily_steps: u32,
) -> CategoryScore {
    let category = ScoreCategory::Activity;

    let time = scoring::score_training_time(training_minutes_per_day);
    let intensity = scoring::score_training_intensity(training_intensity);
    let steps = scoring::score_daily_steps(daily_steps);

    let total = time.points + intensity.points + steps.points;
    let items = vec![
        HistoryItem::from_result(
            category,
            thresholds::TRAINING_TIME.label,
            time,
            thresholds::TRAINING_TIME.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::TRAINING_INTENSITY.label,
            intensity,
            thresholds::TRAINING_INTENSITY.max_points,
        ),
        HistoryItem::from_result(
            category,
            thresholds::DAILY_STEPS.label,
            steps,
            thresholds::DAILY_STEPS.max_points,
        ),
    ];

    CategoryScore { category, total, items }
}
