//! Assistant support
//!
//! Two pieces sit directly downstream of the scoring core:
//!
//! - [`format_context`] renders the monthly average, the live snapshot, and
//!   the trend summary into the text block handed to the language-model
//!   client (the client itself is an external collaborator)
//! - [`RuleBasedAssistant`] answers common questions deterministically from
//!   the same data, used as the local fallback when no model backend is
//!   configured or reachable

use crate::models::{HealthMetrics, MonthlyAverageResult, Trend, TrendSummary};
use crate::thresholds::{
    ACTIVITY_MAX_POINTS, BONUS_MAX_POINTS, CARDIOVASCULAR_MAX_POINTS, RECOVERY_MAX_POINTS,
};
use std::fmt::Write;

/// Render the scoring state into the assistant's context block.
///
/// The core's obligation is well-formed numbers and trend labels; wording
/// here is presentation, kept stable so cached replies stay comparable.
pub fn format_context(
    monthly: &MonthlyAverageResult,
    current: &HealthMetrics,
    trends: &TrendSummary,
) -> String {
    let mut out = String::new();

    writeln!(out, "== Wellness summary (last 30 days) ==").ok();
    writeln!(
        out,
        "Overall score: {}/100 ({}){}",
        monthly.total_score,
        monthly.level,
        if monthly.is_estimated {
            " [estimated from current snapshot, no history]"
        } else {
            ""
        }
    )
    .ok();
    writeln!(
        out,
        "Category averages: cardiovascular {:.1}/{}, recovery {:.1}/{}, activity {:.1}/{}, bonus {:.1}/{}",
        monthly.cardiovascular_avg,
        CARDIOVASCULAR_MAX_POINTS,
        monthly.recovery_avg,
        RECOVERY_MAX_POINTS,
        monthly.activity_avg,
        ACTIVITY_MAX_POINTS,
        monthly.bonus_avg,
        BONUS_MAX_POINTS,
    )
    .ok();
    writeln!(out, "Data points: {}", monthly.data_points_count).ok();

    writeln!(out).ok();
    writeln!(out, "== Current metrics ==").ok();
    writeln!(
        out,
        "Resting HR {:.0} bpm, HRV {:.0} ms, VO2max {:.1} ml/kg/min",
        current.resting_heart_rate, current.heart_rate_variability, current.vo2_max
    )
    .ok();
    writeln!(
        out,
        "Deep sleep {:.1}%, REM sleep {:.1}%, sleep consistency {:.0}/100",
        current.deep_sleep_pct, current.rem_sleep_pct, current.sleep_consistency
    )
    .ok();
    writeln!(
        out,
        "Training {:.0} min/day at intensity {:.0}/100, {} steps/day",
        current.training_minutes_per_day, current.training_intensity, current.daily_steps
    )
    .ok();

    writeln!(out).ok();
    writeln!(out, "== Trends ==").ok();
    writeln!(
        out,
        "Heart health: {}, sleep: {}, activity: {}",
        trends.heart, trends.sleep, trends.activity
    )
    .ok();

    out
}

/// Deterministic keyword-dispatch answers over the scoring state
///
/// Not a language model: every answer is assembled from the same numeric
/// fields the context block carries, so responses are reproducible and
/// cacheable.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAssistant;

impl RuleBasedAssistant {
    pub fn new() -> Self {
        Self
    }

    /// Answer a free-text question from the current scoring state.
    pub fn answer(
        &self,
        question: &str,
        monthly: &MonthlyAverageResult,
        current: &HealthMetrics,
        trends: &TrendSummary,
    ) -> String {
        let q = question.to_lowercase();

        if q.contains("sleep") {
            return format!(
                "Your sleep is {}. You are averaging {:.1}% deep sleep and {:.1}% REM, \
                 with a consistency score of {:.0}/100. {}",
                trends.sleep,
                current.deep_sleep_pct,
                current.rem_sleep_pct,
                current.sleep_consistency,
                trend_remark(trends.sleep, "sleep"),
            );
        }

        if q.contains("heart") || q.contains("hrv") || q.contains("cardio") {
            return format!(
                "Your heart health is {}. Resting heart rate is {:.0} bpm and HRV is \
                 {:.0} ms. {}",
                trends.heart,
                current.resting_heart_rate,
                current.heart_rate_variability,
                trend_remark(trends.heart, "heart health"),
            );
        }

        if q.contains("activity") || q.contains("train") || q.contains("steps")
            || q.contains("workout")
        {
            return format!(
                "Your activity is {}. You are training {:.0} minutes a day and walking \
                 {} steps. {}",
                trends.activity,
                current.training_minutes_per_day,
                current.daily_steps,
                trend_remark(trends.activity, "activity"),
            );
        }

        if q.contains("score") || q.contains("level") || q.contains("overall")
            || q.contains("doing")
        {
            return format!(
                "Your overall wellness score is {}/100, which puts you at {}.{}",
                monthly.total_score,
                monthly.level,
                if monthly.is_estimated {
                    " This is estimated from your current snapshot; keep logging data \
                     for a fuller 30-day picture."
                } else {
                    ""
                }
            );
        }

        format!(
            "I track your wellness score, sleep, heart health, and activity. Right now \
             your score is {}/100 ({}); ask about any of those areas for detail.",
            monthly.total_score, monthly.level
        )
    }
}

fn trend_remark(trend: Trend, dimension: &str) -> String {
    match trend {
        Trend::Improving => format!("Nice progress, your {} is moving the right way.", dimension),
        Trend::Stable => format!("Your {} has been holding steady.", dimension),
        Trend::Declining => format!(
            "Your {} has slipped recently; it may be worth some attention.",
            dimension
        ),
    }
}
