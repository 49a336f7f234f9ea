//! Fitness-score composer
//!
//! The top-level scoring entry point: runs the three category aggregators
//! over a metrics snapshot, applies the bonus, and maps the 0-100 sum to a
//! qualitative fitness level. Every run emits ten history items (nine
//! metrics plus one bonus, the bonus item present even at zero points).

use crate::bonus::{evaluate_bonus, BonusPolicy};
use crate::categories;
use crate::models::{
    DailyFitnessScore, DailyHealthMetrics, FitnessLevel, FitnessScoreResult, HealthMetrics,
    HistoryItem, ScoreCategory, ScoringResult,
};
use crate::thresholds::BONUS_MAX_POINTS;
use tracing::debug;

/// Composes category scores, bonus, and fitness level from a snapshot
///
/// Pure and synchronous; owns no shared state. Construct one per
/// configuration and pass it wherever scoring is needed.
#[derive(Debug, Clone, Default)]
pub struct FitnessCalculator {
    policy: BonusPolicy,
}

impl FitnessCalculator {
    /// Calculator with the default bonus policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with an explicit bonus policy
    pub fn with_policy(policy: BonusPolicy) -> Self {
        FitnessCalculator { policy }
    }

    /// Score a live metrics snapshot.
    pub fn calculate(&self, metrics: &HealthMetrics) -> FitnessScoreResult {
        let cardiovascular = categories::cardiovascular_points(
            metrics.resting_heart_rate,
            metrics.heart_rate_variability,
            metrics.vo2_max,
        );
        let recovery = categories::recovery_points(
            metrics.deep_sleep_pct,
            metrics.rem_sleep_pct,
            metrics.sleep_consistency,
        );
        let activity = categories::activity_points(
            metrics.training_minutes_per_day,
            metrics.training_intensity,
            metrics.daily_steps,
        );

        let bonus = evaluate_bonus(
            cardiovascular.total,
            recovery.total,
            activity.total,
            &self.policy,
        );

        let total_score =
            cardiovascular.total + recovery.total + activity.total + bonus.points;
        let level = FitnessLevel::from_score(total_score);

        debug!(
            total_score,
            cardiovascular = cardiovascular.total,
            recovery = recovery.total,
            activity = activity.total,
            bonus = bonus.points,
            "fitness score computed"
        );

        let mut history_items: Vec<HistoryItem> = Vec::with_capacity(10);
        history_items.extend(cardiovascular.items);
        history_items.extend(recovery.items);
        history_items.extend(activity.items);
        history_items.push(HistoryItem::from_result(
            ScoreCategory::Bonus,
            ScoreCategory::Bonus.label(),
            ScoringResult {
                points: bonus.points,
                reason: bonus.reason,
            },
            BONUS_MAX_POINTS,
        ));

        FitnessScoreResult {
            total_score,
            cardiovascular_points: cardiovascular.total,
            recovery_points: recovery.total,
            activity_points: activity.total,
            bonus_points: bonus.points,
            level,
            history_items,
        }
    }

    /// Score one calendar day's metrics.
    pub fn calculate_daily(&self, daily: &DailyHealthMetrics) -> DailyFitnessScore {
        let result = self.calculate(&daily.metrics);
        DailyFitnessScore {
            date: daily.date,
            total_score: result.total_score,
            cardiovascular_points: result.cardiovascular_points,
            recovery_points: result.recovery_points,
            activity_points: result.activity_points,
            bonus_points: result.bonus_points,
            level: result.level,
            history_items: result.history_items,
        }
    }
}
