//! Threshold tables for the nine metric scorers
//!
//! Pure configuration: each table maps ordered value boundaries to point
//! awards and a rationale string. Adjusting a tier boundary or point value
//! here changes scoring behavior without touching any scorer code.
//!
//! Boundary comparisons are inclusive. Resting heart rate improves downward,
//! so its tiers match with `value <= boundary` against ascending boundaries;
//! every other metric matches with `value >= boundary` against descending
//! boundaries. A value below a table's minimum meaningful reading is treated
//! as "no data" and never reaches the tiers.

/// Which direction of a raw value is healthier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower raw values are better; tiers match with `<=`
    LowerBetter,
    /// Higher raw values are better; tiers match with `>=`
    HigherBetter,
}

/// One scoring tier: an inclusive boundary, its award, and its rationale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Inclusive boundary the raw value is compared against
    pub boundary: f64,
    /// Points awarded when the tier matches
    pub points: u8,
    /// Rationale shown on the history item
    pub reason: &'static str,
}

/// Threshold table for a single metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    /// Human label used as the history item's metric name
    pub label: &'static str,
    /// Highest award any tier grants
    pub max_points: u8,
    /// Comparison direction for tier matching
    pub direction: Direction,
    /// Smallest raw value that counts as a real reading; below it is "no data"
    pub min_meaningful: f64,
    /// Reason reported for the "no data" result
    pub no_data_reason: &'static str,
    /// Ordered tiers, best first
    pub tiers: &'static [Tier],
    /// Award when no tier matches (the worst present reading)
    pub floor_points: u8,
    /// Rationale for the floor award
    pub floor_reason: &'static str,
}

/// Cardiovascular Health category ceiling (sum of its three metric maxima)
pub const CARDIOVASCULAR_MAX_POINTS: u8 = 30;

/// Recovery & Regeneration category ceiling
pub const RECOVERY_MAX_POINTS: u8 = 35;

/// Activity & Training category ceiling
pub const ACTIVITY_MAX_POINTS: u8 = 30;

/// Bonus Metric ceiling
pub const BONUS_MAX_POINTS: u8 = 5;

/// Resting heart rate (bpm); athlete-level readings sit at or below 50
pub const RESTING_HEART_RATE: MetricThresholds = MetricThresholds {
    label: "Resting Heart Rate",
    max_points: 10,
    direction: Direction::LowerBetter,
    min_meaningful: 20.0,
    no_data_reason: "No resting heart rate data available",
    tiers: &[
        Tier { boundary: 50.0, points: 10, reason: "Excellent resting heart rate, athlete range" },
        Tier { boundary: 60.0, points: 8, reason: "Very good resting heart rate" },
        Tier { boundary: 70.0, points: 5, reason: "Average resting heart rate" },
        Tier { boundary: 80.0, points: 3, reason: "Elevated resting heart rate" },
    ],
    floor_points: 1,
    floor_reason: "High resting heart rate, worth discussing with a doctor",
};

/// Heart rate variability (ms, SDNN-style)
pub const HEART_RATE_VARIABILITY: MetricThresholds = MetricThresholds {
    label: "Heart Rate Variability",
    max_points: 10,
    direction: Direction::HigherBetter,
    min_meaningful: 1.0,
    no_data_reason: "No heart rate variability data available",
    tiers: &[
        Tier { boundary: 70.0, points: 10, reason: "Excellent HRV, strong recovery capacity" },
        Tier { boundary: 50.0, points: 8, reason: "Very good HRV" },
        Tier { boundary: 40.0, points: 6, reason: "Good HRV" },
        Tier { boundary: 30.0, points: 4, reason: "Moderate HRV" },
        Tier { boundary: 20.0, points: 2, reason: "Low HRV, recovery may be limited" },
    ],
    floor_points: 1,
    floor_reason: "Very low HRV, prioritize rest",
};

/// VO2max (ml/kg/min); readings below 10 are not physiologically plausible
pub const VO2_MAX: MetricThresholds = MetricThresholds {
    label: "VO2max",
    max_points: 10,
    direction: Direction::HigherBetter,
    min_meaningful: 10.0,
    no_data_reason: "No VO2max data available",
    tiers: &[
        Tier { boundary: 50.0, points: 10, reason: "Excellent aerobic capacity" },
        Tier { boundary: 42.0, points: 8, reason: "Very good aerobic capacity" },
        Tier { boundary: 35.0, points: 6, reason: "Good aerobic capacity" },
        Tier { boundary: 28.0, points: 4, reason: "Fair aerobic capacity" },
    ],
    floor_points: 2,
    floor_reason: "Low aerobic capacity, room to build endurance",
};

/// Deep sleep as a percentage of total sleep; 13-23% is typical for adults
pub const DEEP_SLEEP: MetricThresholds = MetricThresholds {
    label: "Deep Sleep",
    max_points: 12,
    direction: Direction::HigherBetter,
    min_meaningful: 0.1,
    no_data_reason: "No deep sleep data available",
    tiers: &[
        Tier { boundary: 20.0, points: 12, reason: "Excellent deep sleep share" },
        Tier { boundary: 15.0, points: 9, reason: "Good deep sleep share" },
        Tier { boundary: 10.0, points: 6, reason: "Moderate deep sleep share" },
        Tier { boundary: 5.0, points: 3, reason: "Low deep sleep share" },
    ],
    floor_points: 1,
    floor_reason: "Very little deep sleep recorded",
};

/// REM sleep as a percentage of total sleep; 20-25% is typical for adults
pub const REM_SLEEP: MetricThresholds = MetricThresholds {
    label: "REM Sleep",
    max_points: 12,
    direction: Direction::HigherBetter,
    min_meaningful: 0.1,
    no_data_reason: "No REM sleep data available",
    tiers: &[
        Tier { boundary: 25.0, points: 12, reason: "Excellent REM sleep share" },
        Tier { boundary: 20.0, points: 9, reason: "Good REM sleep share" },
        Tier { boundary: 15.0, points: 6, reason: "Moderate REM sleep share" },
        Tier { boundary: 10.0, points: 3, reason: "Low REM sleep share" },
    ],
    floor_points: 1,
    floor_reason: "Very little REM sleep recorded",
};

/// Sleep consistency score (0-100), see [`crate::sleep::consistency_score`]
pub const SLEEP_CONSISTENCY: MetricThresholds = MetricThresholds {
    label: "Sleep Consistency",
    max_points: 11,
    direction: Direction::HigherBetter,
    min_meaningful: 0.1,
    no_data_reason: "No sleep consistency data available",
    tiers: &[
        Tier { boundary: 85.0, points: 11, reason: "Very regular sleep schedule" },
        Tier { boundary: 70.0, points: 8, reason: "Mostly regular sleep schedule" },
        Tier { boundary: 55.0, points: 5, reason: "Somewhat irregular sleep schedule" },
        Tier { boundary: 40.0, points: 3, reason: "Irregular sleep schedule" },
    ],
    floor_points: 1,
    floor_reason: "Highly irregular sleep schedule",
};

/// Training time in the canonical minutes-per-day unit
pub const TRAINING_TIME: MetricThresholds = MetricThresholds {
    label: "Training Time",
    max_points: 12,
    direction: Direction::HigherBetter,
    min_meaningful: 0.1,
    no_data_reason: "No training time data available",
    tiers: &[
        Tier { boundary: 40.0, points: 12, reason: "Excellent training volume" },
        Tier { boundary: 30.0, points: 9, reason: "Good training volume" },
        Tier { boundary: 20.0, points: 6, reason: "Moderate training volume" },
        Tier { boundary: 10.0, points: 3, reason: "Light training volume" },
    ],
    floor_points: 1,
    floor_reason: "Minimal training time recorded",
};

/// Training intensity (0-100)
pub const TRAINING_INTENSITY: MetricThresholds = MetricThresholds {
    label: "Training Intensity",
    max_points: 8,
    direction: Direction::HigherBetter,
    min_meaningful: 0.1,
    no_data_reason: "No training intensity data available",
    tiers: &[
        Tier { boundary: 85.0, points: 8, reason: "High training intensity" },
        Tier { boundary: 70.0, points: 6, reason: "Solid training intensity" },
        Tier { boundary: 50.0, points: 4, reason: "Moderate training intensity" },
        Tier { boundary: 30.0, points: 2, reason: "Low training intensity" },
    ],
    floor_points: 1,
    floor_reason: "Very low training intensity",
};

/// Daily step count
pub const DAILY_STEPS: MetricThresholds = MetricThresholds {
    label: "Daily Steps",
    max_points: 10,
    direction: Direction::HigherBetter,
    min_meaningful: 1.0,
    no_data_reason: "No step data available",
    tiers: &[
        Tier { boundary: 12500.0, points: 10, reason: "Excellent daily step count" },
        Tier { boundary: 10000.0, points: 8, reason: "Very good daily step count" },
        Tier { boundary: 7500.0, points: 6, reason: "Good daily step count" },
        Tier { boundary: 5000.0, points: 4, reason: "Moderate daily step count" },
        Tier { boundary: 2500.0, points: 2, reason: "Low daily step count" },
    ],
    floor_points: 1,
    floor_reason: "Very low daily step count",
};

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABLES: [&MetricThresholds; 9] = [
        &RESTING_HEART_RATE,
        &HEART_RATE_VARIABILITY,
        &VO2_MAX,
        &DEEP_SLEEP,
        &REM_SLEEP,
        &SLEEP_CONSISTENCY,
        &TRAINING_TIME,
        &TRAINING_INTENSITY,
        &DAILY_STEPS,
    ];

    #[test]
    fn test_best_tier_matches_declared_max() {
        for table in ALL_TABLES {
            let best = table.tiers.iter().map(|t| t.points).max().unwrap();
            assert_eq!(
                best, table.max_points,
                "{}: best tier {} != declared max {}",
                table.label, best, table.max_points
            );
        }
    }

    #[test]
    fn test_tiers_ordered_best_first() {
        for table in ALL_TABLES {
            for pair in table.tiers.windows(2) {
                assert!(
                    pair[0].points > pair[1].points,
                    "{}: tier points must strictly decrease",
                    table.label
                );
                match table.direction {
                    Direction::LowerBetter => assert!(
                        pair[0].boundary < pair[1].boundary,
                        "{}: lower-better boundaries must ascend",
                        table.label
                    ),
                    Direction::HigherBetter => assert!(
                        pair[0].boundary > pair[1].boundary,
                        "{}: higher-better boundaries must descend",
                        table.label
                    ),
                }
            }
            assert!(
                table.floor_points < table.tiers.last().unwrap().points,
                "{}: floor must award less than the worst tier",
                table.label
            );
        }
    }

    #[test]
    fn test_category_maxima_sum_from_tables() {
        assert_eq!(
            RESTING_HEART_RATE.max_points + HEART_RATE_VARIABILITY.max_points + VO2_MAX.max_points,
            CARDIOVASCULAR_MAX_POINTS
        );
        assert_eq!(
            DEEP_SLEEP.max_points + REM_SLEEP.max_points + SLEEP_CONSISTENCY.max_points,
            RECOVERY_MAX_POINTS
        );
        assert_eq!(
            TRAINING_TIME.max_points + TRAINING_INTENSITY.max_points + DAILY_STEPS.max_points,
            ACTIVITY_MAX_POINTS
        );
    }

    #[test]
    fn test_total_ceiling_is_one_hundred() {
        assert_eq!(
            CARDIOVASCULAR_MAX_POINTS + RECOVERY_MAX_POINTS + ACTIVITY_MAX_POINTS + BONUS_MAX_POINTS,
            100
        );
    }
}
