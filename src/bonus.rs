//! Bonus evaluator
//!
//! Awards 0-5 bonus points from the three category totals. A category is
//! "excellent" when it reaches the excellence threshold as a percentage of
//! its own ceiling; the award is a step function of how many categories
//! qualify, never interpolated. A category at 74.9% earns nothing toward the
//! tier it narrowly missed.

use crate::models::ScoreCategory;
use crate::thresholds::{
    ACTIVITY_MAX_POINTS, BONUS_MAX_POINTS, CARDIOVASCULAR_MAX_POINTS, RECOVERY_MAX_POINTS,
};
use serde::{Deserialize, Serialize};

/// Tunable bonus policy
///
/// The 75% default is carried over from the source system for compatibility;
/// it is a policy constant, not a clinically derived value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BonusPolicy {
    /// Percentage of a category's ceiling required to count as excellent
    pub excellence_threshold_pct: f64,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        BonusPolicy {
            excellence_threshold_pct: 75.0,
        }
    }
}

/// Outcome of a bonus evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusResult {
    /// Awarded bonus points (0, 1, 3, or 5)
    pub points: u8,

    /// Short rationale naming the qualifying categories and their percentages
    pub reason: String,

    /// Longer explanation stating the exact thresholds required
    pub explanation: String,
}

/// Evaluate the bonus from the three category totals.
pub fn evaluate_bonus(
    cardiovascular: u8,
    recovery: u8,
    activity: u8,
    policy: &BonusPolicy,
) -> BonusResult {
    let entries = [
        (
            ScoreCategory::Cardiovascular,
            percentage_of(cardiovascular, CARDIOVASCULAR_MAX_POINTS),
        ),
        (
            ScoreCategory::Recovery,
            percentage_of(recovery, RECOVERY_MAX_POINTS),
        ),
        (
            ScoreCategory::Activity,
            percentage_of(activity, ACTIVITY_MAX_POINTS),
        ),
    ];

    let excellent: Vec<&(ScoreCategory, f64)> = entries
        .iter()
        .filter(|(_, pct)| *pct >= policy.excellence_threshold_pct)
        .collect();

    let points = match excellent.len() {
        3 => 5,
        2 => 3,
        1 => 1,
        _ => 0,
    };

    let reason = if excellent.is_empty() {
        "No category reached the excellence threshold".to_string()
    } else {
        let names: Vec<String> = excellent
            .iter()
            .map(|(category, pct)| format!("{} ({:.0}%)", category.label(), pct))
            .collect();
        format!("Excellent: {}", names.join(", "))
    };

    let threshold = policy.excellence_threshold_pct;
    let explanation = format!(
        "A category is excellent at or above {:.0}% of its maximum: \
         {:.1} of {} cardiovascular points, {:.1} of {} recovery points, \
         {:.1} of {} activity points. Three excellent categories earn {} \
         bonus points, two earn 3, one earns 1.",
        threshold,
        threshold / 100.0 * CARDIOVASCULAR_MAX_POINTS as f64,
        CARDIOVASCULAR_MAX_POINTS,
        threshold / 100.0 * RECOVERY_MAX_POINTS as f64,
        RECOVERY_MAX_POINTS,
        threshold / 100.0 * ACTIVITY_MAX_POINTS as f64,
        ACTIVITY_MAX_POINTS,
        BONUS_MAX_POINTS,
    );

    BonusResult {
        points,
        reason,
        explanation,
    }
}

fn percentage_of(points: u8, max_points: u8) -> f64 {
    points as f64 / max_points as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonus(cardio: u8, recovery: u8, activity: u8) -> BonusResult {
        evaluate_bonus(cardio, recovery, activity, &BonusPolicy::default())
    }

    #[test]
    fn test_three_excellent_categories() {
        // 28/30 = 93%, 33/35 = 94%, 29/30 = 97%
        let result = bonus(28, 33, 29);
        assert_eq!(result.points, 5);
        assert!(result.reason.contains("Cardiovascular Health"));
        assert!(result.reason.contains("Recovery & Regeneration"));
        assert!(result.reason.contains("Activity & Training"));
    }

    #[test]
    fn test_two_excellent_categories() {
        // 28/30 = 93%, 33/35 = 94%, 10/30 = 33%
        let result = bonus(28, 33, 10);
        assert_eq!(result.points, 3);
        assert!(!result.reason.contains("Activity & Training"));
    }

    #[test]
    fn test_one_excellent_category() {
        let result = bonus(28, 10, 10);
        assert_eq!(result.points, 1);
        assert!(result.reason.contains("Cardiovascular Health"));
    }

    #[test]
    fn test_no_excellent_category() {
        let result = bonus(10, 10, 10);
        assert_eq!(result.points, 0);
        assert!(result.reason.contains("No category"));
    }

    #[test]
    fn test_threshold_edge_is_inclusive() {
        // 75% of 30 is exactly 22.5; 23/30 = 76.7% passes, 22/30 = 73.3%
        // does not
        assert_eq!(bonus(23, 0, 0).points, 1);
        assert_eq!(bonus(22, 0, 0).points, 0);

        // Recovery at exactly 75%: 26.25/35 is not reachable with whole
        // points, so 27/35 = 77.1% passes and 26/35 = 74.3% does not
        assert_eq!(bonus(0, 27, 0).points, 1);
        assert_eq!(bonus(0, 26, 0).points, 0);
    }

    #[test]
    fn test_exact_percentage_boundary() {
        // A policy with a threshold hit exactly by whole points: 50% of 30
        let policy = BonusPolicy {
            excellence_threshold_pct: 50.0,
        };
        let at_edge = evaluate_bonus(15, 0, 0, &policy);
        assert_eq!(at_edge.points, 1);
        let below_edge = evaluate_bonus(14, 0, 0, &policy);
        assert_eq!(below_edge.points, 0);
    }

    #[test]
    fn test_explanation_states_thresholds() {
        let result = bonus(0, 0, 0);
        assert!(result.explanation.contains("75%"));
        assert!(result.explanation.contains("22.5"));
        assert!(result.explanation.contains("26.2"));
    }
}
