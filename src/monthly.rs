//! Monthly averaging
//!
//! Produces the rolling 30-day [`MonthlyAverageResult`] in one of two
//! equivalent forms:
//!
//! - from logged [`HistoryItem`]s: group by category and average each
//!   category's item points across however many items exist (item counts may
//!   differ per category, since items are logged per metric event, not per
//!   day), then sum the four averages
//! - from [`DailyFitnessScore`]s: average each category-total field directly
//!   across days, then sum
//!
//! Daily category points are averaged, never raw metrics. With no history at
//! all, the averager falls back to scoring the supplied live snapshot once
//! and marks the result as estimated.

use crate::fitness::FitnessCalculator;
use crate::models::{
    DailyFitnessScore, FitnessLevel, HealthMetrics, HistoryItem, MonthlyAverageResult,
    ScoreCategory,
};
use tracing::debug;

/// Computes 30-day averages over history items or daily scores
#[derive(Debug, Clone, Default)]
pub struct MonthlyAverager {
    calculator: FitnessCalculator,
}

impl MonthlyAverager {
    /// Averager scoring fallbacks with the default policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Averager with an explicit calculator for the estimated fallback
    pub fn with_calculator(calculator: FitnessCalculator) -> Self {
        MonthlyAverager { calculator }
    }

    /// Average a flat list of history items already filtered to the window.
    ///
    /// `current` is only consulted when `items` is empty.
    pub fn from_history(
        &self,
        items: &[HistoryItem],
        current: &HealthMetrics,
    ) -> MonthlyAverageResult {
        if items.is_empty() {
            return self.estimate_from_snapshot(current);
        }

        let cardiovascular_avg = category_item_average(items, ScoreCategory::Cardiovascular);
        let recovery_avg = category_item_average(items, ScoreCategory::Recovery);
        let activity_avg = category_item_average(items, ScoreCategory::Activity);
        let bonus_avg = category_item_average(items, ScoreCategory::Bonus);

        let total =
            (cardiovascular_avg + recovery_avg + activity_avg + bonus_avg).round() as u8;

        debug!(
            items = items.len(),
            total, "monthly average from history items"
        );

        MonthlyAverageResult {
            total_score: total,
            cardiovascular_avg,
            recovery_avg,
            activity_avg,
            bonus_avg,
            level: FitnessLevel::from_score(total),
            data_points_count: items.len(),
            is_estimated: false,
            daily_scores: None,
        }
    }

    /// Average daily scores' category totals across days.
    ///
    /// `current` is only consulted when `scores` is empty.
    pub fn from_daily_scores(
        &self,
        scores: &[DailyFitnessScore],
        current: &HealthMetrics,
    ) -> MonthlyAverageResult {
        if scores.is_empty() {
            return self.estimate_from_snapshot(current);
        }

        let count = scores.len() as f64;
        let cardiovascular_avg =
            scores.iter().map(|s| s.cardiovascular_points as f64).sum::<f64>() / count;
        let recovery_avg = scores.iter().map(|s| s.recovery_points as f64).sum::<f64>() / count;
        let activity_avg = scores.iter().map(|s| s.activity_points as f64).sum::<f64>() / count;
        let bonus_avg = scores.iter().map(|s| s.bonus_points as f64).sum::<f64>() / count;

        let total =
            (cardiovascular_avg + recovery_avg + activity_avg + bonus_avg).round() as u8;

        debug!(
            days = scores.len(),
            total, "monthly average from daily scores"
        );

        MonthlyAverageResult {
            total_score: total,
            cardiovascular_avg,
            recovery_avg,
            activity_avg,
            bonus_avg,
            level: FitnessLevel::from_score(total),
            data_points_count: scores.len(),
            is_estimated: false,
            daily_scores: Some(scores.to_vec()),
        }
    }

    /// Fallback: one scoring pass over the live snapshot.
    fn estimate_from_snapshot(&self, current: &HealthMetrics) -> MonthlyAverageResult {
        debug!("no history in window, estimating from live snapshot");
        let result = self.calculator.calculate(current);

        MonthlyAverageResult {
            total_score: result.total_score,
            cardiovascular_avg: result.cardiovascular_points as f64,
            recovery_avg: result.recovery_points as f64,
            activity_avg: result.activity_points as f64,
            bonus_avg: result.bonus_points as f64,
            level: result.level,
            data_points_count: 0,
            is_estimated: true,
            daily_scores: None,
        }
    }
}

/// Mean of item points for one category, 0 when the category has no items.
fn category_item_average(items: &[HistoryItem], category: ScoreCategory) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for item in items.iter().filter(|i| i.category == category) {
        sum += item.points as f64;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
