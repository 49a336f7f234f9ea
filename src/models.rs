//! Core data model for wellness scoring and trend analysis
//!
//! Defines the metric snapshots consumed by the scoring pipeline, the scoring
//! outputs (per-metric results, history items, composite scores), the
//! aggregated monthly view, and the raw sample types delivered by the
//! health-data source.
//!
//! # Conventions
//!
//! All metric fields are non-negative. A value of exactly `0.0` is the
//! sentinel for "no data available" and scores as a zero-point "no data"
//! result rather than being matched against the lowest threshold tier.
//!
//! Training time is always expressed in **minutes per day**. Call sites that
//! receive weekly or monthly figures must convert through
//! [`weekly_training_minutes_to_daily`] or
//! [`monthly_training_minutes_to_daily`] before building a
//! [`HealthMetrics`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Convert a weekly training-time figure to the canonical minutes-per-day unit.
pub fn weekly_training_minutes_to_daily(weekly_minutes: f64) -> f64 {
    weekly_minutes / 7.0
}

/// Convert a monthly training-time figure to the canonical minutes-per-day unit.
///
/// Uses the same 30-day month the rolling history window uses.
pub fn monthly_training_minutes_to_daily(monthly_minutes: f64) -> f64 {
    monthly_minutes / 30.0
}

/// Snapshot of a user's biometric state, either live or averaged
///
/// # Usage
///
/// ```rust
/// use vitalrs::models::HealthMetrics;
///
/// let metrics = HealthMetrics {
///     resting_heart_rate: 58.0,
///     heart_rate_variability: 52.0,
///     vo2_max: 44.0,
///     deep_sleep_pct: 18.0,
///     rem_sleep_pct: 22.0,
///     sleep_consistency: 80.0,
///     training_minutes_per_day: 35.0,
///     training_intensity: 70.0,
///     daily_steps: 9500,
/// };
/// assert!(metrics.has_any_data());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Resting heart rate in beats per minute (lower is better)
    pub resting_heart_rate: f64,

    /// Heart rate variability in milliseconds (SDNN-style)
    pub heart_rate_variability: f64,

    /// Maximal oxygen uptake in ml/kg/min
    pub vo2_max: f64,

    /// Deep sleep as a percentage of total sleep time
    pub deep_sleep_pct: f64,

    /// REM sleep as a percentage of total sleep time
    pub rem_sleep_pct: f64,

    /// Sleep regularity score (0-100), see [`crate::sleep::consistency_score`]
    pub sleep_consistency: f64,

    /// Training time in the canonical minutes-per-day unit
    pub training_minutes_per_day: f64,

    /// Training intensity (0-100)
    pub training_intensity: f64,

    /// Step count for the day
    pub daily_steps: u32,
}

impl HealthMetrics {
    /// An all-zero snapshot, the "no data" state for every metric
    pub fn empty() -> Self {
        HealthMetrics {
            resting_heart_rate: 0.0,
            heart_rate_variability: 0.0,
            vo2_max: 0.0,
            deep_sleep_pct: 0.0,
            rem_sleep_pct: 0.0,
            sleep_consistency: 0.0,
            training_minutes_per_day: 0.0,
            training_intensity: 0.0,
            daily_steps: 0,
        }
    }

    /// True if at least one underlying data source reported a value
    ///
    /// Mirrors the inclusion rule of the historical aggregator: a day counts
    /// when any of steps, sleep, heart rate, or HRV is present.
    pub fn has_any_data(&self) -> bool {
        self.daily_steps > 0
            || self.deep_sleep_pct > 0.0
            || self.rem_sleep_pct > 0.0
            || self.resting_heart_rate > 0.0
            || self.heart_rate_variability > 0.0
    }
}

/// [`HealthMetrics`] scoped to a single calendar day
///
/// `metrics.training_minutes_per_day` carries that day's training time only,
/// never a weekly or monthly figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHealthMetrics {
    /// Calendar day the metrics cover
    pub date: NaiveDate,

    /// The day's metric values
    pub metrics: HealthMetrics,
}

/// Atomic output of a single metric scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Points awarded, always within `[0, max]` for the metric
    pub points: u8,

    /// Human-readable rationale for the award
    pub reason: String,
}

/// The four scoring buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreCategory {
    Cardiovascular,
    Recovery,
    Activity,
    Bonus,
}

impl ScoreCategory {
    /// Display label used on history items and in assistant context
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Cardiovascular => "Cardiovascular Health",
            ScoreCategory::Recovery => "Recovery & Regeneration",
            ScoreCategory::Activity => "Activity & Training",
            ScoreCategory::Bonus => "Bonus Metric",
        }
    }

    /// Stable identifier used by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreCategory::Cardiovascular => "cardiovascular",
            ScoreCategory::Recovery => "recovery",
            ScoreCategory::Activity => "activity",
            ScoreCategory::Bonus => "bonus",
        }
    }
}

impl std::str::FromStr for ScoreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardiovascular" => Ok(ScoreCategory::Cardiovascular),
            "recovery" => Ok(ScoreCategory::Recovery),
            "activity" => Ok(ScoreCategory::Activity),
            "bonus" => Ok(ScoreCategory::Bonus),
            other => Err(format!("unknown score category: {}", other)),
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One persisted scoring line: metric, points, rationale, timestamp
///
/// Emitted once per metric per scoring run plus one bonus item, immutable
/// once created. The persistence layer retains items for the rolling 30-day
/// window and prunes older ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique identifier
    pub id: Uuid,

    /// Scoring bucket this line belongs to
    pub category: ScoreCategory,

    /// Human label of the underlying metric (e.g. "Resting Heart Rate")
    pub metric: String,

    /// Points awarded
    pub points: u8,

    /// Ceiling declared by the metric's scorer
    pub max_points: u8,

    /// Rationale carried over from the scoring result
    pub reason: String,

    /// When the scoring run produced this item
    pub timestamp: DateTime<Utc>,
}

impl HistoryItem {
    /// Build a history item from a scorer's output
    pub fn from_result(
        category: ScoreCategory,
        metric: &str,
        result: ScoringResult,
        max_points: u8,
    ) -> Self {
        HistoryItem {
            id: Uuid::new_v4(),
            category,
            metric: metric.to_string(),
            points: result.points,
            max_points,
            reason: result.reason,
            timestamp: Utc::now(),
        }
    }
}

/// Qualitative fitness label derived from the total score
///
/// The five bands are non-overlapping and cover `[0, 100]`:
/// `[90, 100]`, `[70, 90)`, `[50, 70)`, `[30, 50)`, `[0, 30)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessLevel {
    PeakCondition,
    StrongActive,
    ModeratelyFit,
    BuildingUp,
    NeedsFocus,
}

impl FitnessLevel {
    /// Map a total score (0-100) to its level band
    pub fn from_score(total_score: u8) -> Self {
        if total_score >= 90 {
            FitnessLevel::PeakCondition
        } else if total_score >= 70 {
            FitnessLevel::StrongActive
        } else if total_score >= 50 {
            FitnessLevel::ModeratelyFit
        } else if total_score >= 30 {
            FitnessLevel::BuildingUp
        } else {
            FitnessLevel::NeedsFocus
        }
    }

    /// Stable identifier used by the persistence layer
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::PeakCondition => "peak_condition",
            FitnessLevel::StrongActive => "strong_active",
            FitnessLevel::ModeratelyFit => "moderately_fit",
            FitnessLevel::BuildingUp => "building_up",
            FitnessLevel::NeedsFocus => "needs_focus",
        }
    }
}

impl std::str::FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "peak_condition" => Ok(FitnessLevel::PeakCondition),
            "strong_active" => Ok(FitnessLevel::StrongActive),
            "moderately_fit" => Ok(FitnessLevel::ModeratelyFit),
            "building_up" => Ok(FitnessLevel::BuildingUp),
            "needs_focus" => Ok(FitnessLevel::NeedsFocus),
            other => Err(format!("unknown fitness level: {}", other)),
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FitnessLevel::PeakCondition => "Peak Condition",
            FitnessLevel::StrongActive => "Strong & Active",
            FitnessLevel::ModeratelyFit => "Moderately Fit",
            FitnessLevel::BuildingUp => "Building Up",
            FitnessLevel::NeedsFocus => "Needs Focus",
        };
        write!(f, "{}", label)
    }
}

/// Output of one scoring pass over a [`HealthMetrics`] snapshot
///
/// Ephemeral: recomputed on demand, never mutated. `total_score` is exactly
/// the sum of the four category fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessScoreResult {
    /// Composite wellness score (0-100)
    pub total_score: u8,

    /// Cardiovascular Health points (0-30)
    pub cardiovascular_points: u8,

    /// Recovery & Regeneration points (0-35)
    pub recovery_points: u8,

    /// Activity & Training points (0-30)
    pub activity_points: u8,

    /// Bonus Metric points (0-5)
    pub bonus_points: u8,

    /// Qualitative label for `total_score`
    pub level: FitnessLevel,

    /// The ten items generated by this run (9 metrics + 1 bonus)
    pub history_items: Vec<HistoryItem>,
}

/// A [`FitnessScoreResult`] pinned to the calendar day it was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyFitnessScore {
    /// Calendar day the score covers
    pub date: NaiveDate,

    /// Composite wellness score (0-100)
    pub total_score: u8,

    /// Cardiovascular Health points (0-30)
    pub cardiovascular_points: u8,

    /// Recovery & Regeneration points (0-35)
    pub recovery_points: u8,

    /// Activity & Training points (0-30)
    pub activity_points: u8,

    /// Bonus Metric points (0-5)
    pub bonus_points: u8,

    /// Qualitative label for `total_score`
    pub level: FitnessLevel,

    /// Items generated for this day (not persisted with the daily score)
    pub history_items: Vec<HistoryItem>,
}

/// Aggregated 30-day view of the scoring history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverageResult {
    /// Sum of the four category averages, rounded to a whole score
    pub total_score: u8,

    /// Average Cardiovascular Health points across contributing entries
    pub cardiovascular_avg: f64,

    /// Average Recovery & Regeneration points across contributing entries
    pub recovery_avg: f64,

    /// Average Activity & Training points across contributing entries
    pub activity_avg: f64,

    /// Average Bonus Metric points across contributing entries
    pub bonus_avg: f64,

    /// Qualitative label for `total_score`
    pub level: FitnessLevel,

    /// How many history items or daily scores contributed (not calendar days)
    pub data_points_count: usize,

    /// True when no history existed and the result is a single live snapshot
    pub is_estimated: bool,

    /// Contributing daily scores, when the averager ran over daily scores
    pub daily_scores: Option<Vec<DailyFitnessScore>>,
}

/// Direction of a health dimension over a historical window
///
/// Recomputed each time trends are requested; carries no persisted identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Declining => write!(f, "declining"),
        }
    }
}

/// Trend classification for the three tracked dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Combined resting-heart-rate / HRV signal
    pub heart: Trend,

    /// Composite of deep %, REM %, and consistency
    pub sleep: Trend,

    /// Composite of training time and scaled steps
    pub activity: Trend,
}

impl TrendSummary {
    /// All three dimensions stable, the default for short windows
    pub fn all_stable() -> Self {
        TrendSummary {
            heart: Trend::Stable,
            sleep: Trend::Stable,
            activity: Trend::Stable,
        }
    }
}

//
// ============================================================================
// RAW SAMPLES (delivered by the health-data source)
// ============================================================================
//

/// A step-count sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepsSample {
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,

    /// Steps counted in the sample interval
    pub count: u32,
}

/// A heart-rate sample in beats per minute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,

    /// Heart rate in bpm
    pub bpm: f64,
}

/// A heart-rate-variability sample in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HrvSample {
    /// When the sample was recorded
    pub timestamp: DateTime<Utc>,

    /// SDNN-style variability in milliseconds
    pub sdnn_ms: f64,
}

/// Sleep stage reported by the health-data source
///
/// `Awake` segments count toward time in bed but never toward total sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SleepStage {
    Deep,
    Light,
    Rem,
    Awake,
}

/// One sleep-stage segment with its timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStageSample {
    /// Stage of this segment
    pub stage: SleepStage,

    /// Segment start
    pub start: DateTime<Utc>,

    /// Segment end
    pub end: DateTime<Utc>,
}

impl SleepStageSample {
    /// Segment duration in hours; zero for inverted time ranges
    pub fn duration_hours(&self) -> f64 {
        let seconds = (self.end - self.start).num_seconds();
        if seconds <= 0 {
            0.0
        } else {
            seconds as f64 / 3600.0
        }
    }
}

/// Per-day workout summary from the health-data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Calendar day of the workout
    pub date: NaiveDate,

    /// Training time in minutes for that day
    pub duration_minutes: f64,

    /// Training intensity (0-100)
    pub intensity: f64,
}

/// Raw sample bundle for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRawSamples {
    /// Calendar day the samples cover
    pub date: NaiveDate,

    /// Step-count samples
    pub steps: Vec<StepsSample>,

    /// Heart-rate samples
    pub heart_rate: Vec<HeartRateSample>,

    /// HRV samples
    pub hrv: Vec<HrvSample>,

    /// Sleep-stage segments for the night ending on this day
    pub sleep: Vec<SleepStageSample>,
}
