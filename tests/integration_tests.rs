use chrono::{Duration, NaiveDate, TimeZone, Utc};

use vitalrs::fitness::FitnessCalculator;
use vitalrs::history::HistoricalAggregator;
use vitalrs::models::{
    monthly_training_minutes_to_daily, DailyRawSamples, FitnessLevel, HealthMetrics,
    HeartRateSample, HrvSample, ScoreCategory, SleepStage, SleepStageSample, StepsSample,
    Trend, WorkoutSummary,
};
use vitalrs::monthly::MonthlyAverager;
use vitalrs::storage::HistoryStore;
use vitalrs::trends::TrendAnalyzer;

/// Integration tests covering the full pipeline: raw samples through daily
/// scores, monthly averaging, trends, and storage round trips.

fn excellent_metrics() -> HealthMetrics {
    HealthMetrics {
        resting_heart_rate: 45.0,
        heart_rate_variability: 75.0,
        vo2_max: 55.0,
        deep_sleep_pct: 25.0,
        rem_sleep_pct: 28.0,
        sleep_consistency: 90.0,
        training_minutes_per_day: monthly_training_minutes_to_daily(1200.0),
        training_intensity: 90.0,
        daily_steps: 13_000,
    }
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
}

/// A day of raw samples with a full night of sleep and some movement
fn sample_day(day: u32, steps: u32, rhr: f64, hrv: f64, deep_min: i64, rem_min: i64) -> DailyRawSamples {
    let morning = Utc.with_ymd_and_hms(2025, 6, day, 7, 0, 0).unwrap();
    let night = Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap();

    let mut sleep = Vec::new();
    let mut cursor = night;
    for (stage, minutes) in [
        (SleepStage::Light, 240),
        (SleepStage::Deep, deep_min),
        (SleepStage::Rem, rem_min),
    ] {
        if minutes > 0 {
            sleep.push(SleepStageSample {
                stage,
                start: cursor,
                end: cursor + Duration::minutes(minutes),
            });
            cursor += Duration::minutes(minutes);
        }
    }

    DailyRawSamples {
        date: date(day),
        steps: vec![StepsSample {
            timestamp: morning,
            count: steps,
        }],
        heart_rate: vec![HeartRateSample {
            timestamp: morning,
            bpm: rhr,
        }],
        hrv: vec![HrvSample {
            timestamp: morning,
            sdnn_ms: hrv,
        }],
        sleep,
    }
}

#[test]
fn test_excellent_snapshot_scores_one_hundred() {
    let result = FitnessCalculator::new().calculate(&excellent_metrics());

    assert_eq!(result.total_score, 100);
    assert_eq!(result.bonus_points, 5);
    assert_eq!(result.level, FitnessLevel::PeakCondition);

    // All three categories at or above 90% of their ceilings
    assert!(result.cardiovascular_points as f64 / 30.0 >= 0.9);
    assert!(result.recovery_points as f64 / 35.0 >= 0.9);
    assert!(result.activity_points as f64 / 30.0 >= 0.9);
}

#[test]
fn test_all_zero_snapshot_scores_zero_with_no_data_reasons() {
    let result = FitnessCalculator::new().calculate(&HealthMetrics::empty());

    assert_eq!(result.total_score, 0);
    assert_eq!(result.level, FitnessLevel::NeedsFocus);
    for item in result
        .history_items
        .iter()
        .filter(|i| i.category != ScoreCategory::Bonus)
    {
        assert!(
            item.reason.to_lowercase().contains("no") && item.reason.contains("data"),
            "{}: {}",
            item.metric,
            item.reason
        );
    }
}

#[test]
fn test_raw_samples_to_monthly_average() {
    // Three weeks of consistent data plus a week of silence
    let mut days: Vec<DailyRawSamples> = (1..=21)
        .map(|d| sample_day(d, 9_000, 58.0, 52.0, 80, 90))
        .collect();
    days.extend((22..=28).map(|d| DailyRawSamples {
        date: date(d),
        steps: Vec::new(),
        heart_rate: Vec::new(),
        hrv: Vec::new(),
        sleep: Vec::new(),
    }));

    let workouts: Vec<WorkoutSummary> = (1..=21)
        .map(|d| WorkoutSummary {
            date: date(d),
            duration_minutes: 35.0,
            intensity: 70.0,
        })
        .collect();

    let aggregator = HistoricalAggregator::new();
    let scores = aggregator.daily_scores(&days, &workouts);

    // Silent days are dropped, not scored as zero
    assert_eq!(scores.len(), 21);
    assert!(scores.iter().all(|s| s.total_score > 0));
    // Most recent first
    assert_eq!(scores[0].date, date(21));

    let monthly = MonthlyAverager::new().from_daily_scores(&scores, &HealthMetrics::empty());
    assert!(!monthly.is_estimated);
    assert_eq!(monthly.data_points_count, 21);
    // Identical days: the average equals any single day's totals
    assert!((monthly.cardiovascular_avg - scores[0].cardiovascular_points as f64).abs() < 1e-9);
    assert_eq!(
        monthly.total_score,
        scores[0].total_score
    );
}

#[test]
fn test_monthly_average_from_history_items() {
    let calculator = FitnessCalculator::new();
    let items = calculator.calculate(&excellent_metrics()).history_items;

    let monthly = MonthlyAverager::new().from_history(&items, &HealthMetrics::empty());
    assert!(!monthly.is_estimated);
    assert_eq!(monthly.data_points_count, 10);
    // Per-item averages: cardio (10+10+10)/3, recovery (12+12+11)/3,
    // activity (12+8+10)/3, bonus 5/1
    assert!((monthly.cardiovascular_avg - 10.0).abs() < 1e-9);
    assert!((monthly.recovery_avg - 35.0 / 3.0).abs() < 1e-9);
    assert!((monthly.activity_avg - 10.0).abs() < 1e-9);
    assert!((monthly.bonus_avg - 5.0).abs() < 1e-9);
}

#[test]
fn test_empty_history_falls_back_to_snapshot() {
    let monthly = MonthlyAverager::new().from_history(&[], &excellent_metrics());
    assert!(monthly.is_estimated);
    assert_eq!(monthly.data_points_count, 0);
    assert_eq!(monthly.total_score, 100);
    assert_eq!(monthly.level, FitnessLevel::PeakCondition);
}

#[test]
fn test_trend_window_from_raw_samples() {
    // Second half: resting HR down 10%, HRV up 10%
    let days: Vec<DailyRawSamples> = (1..=14)
        .map(|d| {
            if d <= 7 {
                sample_day(d, 8_000, 60.0, 50.0, 80, 90)
            } else {
                sample_day(d, 8_000, 54.0, 55.0, 80, 90)
            }
        })
        .collect();

    let mut window = HistoricalAggregator::new().daily_metrics(&days, &[]);
    window.sort_by_key(|d| d.date);

    let summary = TrendAnalyzer::new().summarize(&window);
    assert_eq!(summary.heart, Trend::Improving);
    assert_eq!(summary.activity, Trend::Stable);
}

#[test]
fn test_short_trend_window_is_stable() {
    let days: Vec<DailyRawSamples> = (1..=13)
        .map(|d| sample_day(d, 4_000 + d * 1_000, 80.0 - d as f64, 30.0 + d as f64, 80, 90))
        .collect();

    let mut window = HistoricalAggregator::new().daily_metrics(&days, &[]);
    window.sort_by_key(|d| d.date);

    let summary = TrendAnalyzer::new().summarize(&window);
    assert_eq!(summary.heart, Trend::Stable);
    assert_eq!(summary.sleep, Trend::Stable);
    assert_eq!(summary.activity, Trend::Stable);
}

#[test]
fn test_score_persist_and_reaverage_round_trip() {
    let mut store = HistoryStore::open_in_memory().unwrap();
    let calculator = FitnessCalculator::new();

    // Two scoring runs land in the store
    for metrics in [excellent_metrics(), HealthMetrics::empty()] {
        let result = calculator.calculate(&metrics);
        store.save_items(&result.history_items).unwrap();
    }

    let items = store.items_since(Utc::now() - Duration::days(30)).unwrap();
    assert_eq!(items.len(), 20);

    let monthly = MonthlyAverager::new().from_history(&items, &HealthMetrics::empty());
    assert!(!monthly.is_estimated);
    assert_eq!(monthly.data_points_count, 20);
    // One perfect and one empty run average to half the per-item maxima
    assert!((monthly.cardiovascular_avg - 5.0).abs() < 1e-9);
    assert!((monthly.bonus_avg - 2.5).abs() < 1e-9);
}

#[test]
fn test_import_pipeline_with_storage() {
    let days: Vec<DailyRawSamples> = (1..=10)
        .map(|d| sample_day(d, 10_000, 55.0, 60.0, 90, 100))
        .collect();

    let scores = HistoricalAggregator::new().daily_scores(&days, &[]);

    let mut store = HistoryStore::open_in_memory().unwrap();
    for score in &scores {
        store.save_daily_score(score).unwrap();
        store.save_items(&score.history_items).unwrap();
    }

    let loaded = store.daily_scores_since(date(1)).unwrap();
    assert_eq!(loaded.len(), 10);
    assert_eq!(loaded[0].date, date(10));
    assert_eq!(loaded[0].total_score, scores[0].total_score);

    // Ten days of ten items each
    let items = store.items_since(Utc::now() - Duration::days(1)).unwrap();
    assert_eq!(items.len(), 100);
}

#[test]
fn test_retention_prune_keeps_window() {
    let mut store = HistoryStore::open_in_memory().unwrap();
    let calculator = FitnessCalculator::new();

    let mut old_items = calculator.calculate(&excellent_metrics()).history_items;
    for item in &mut old_items {
        item.timestamp = Utc::now() - Duration::days(31);
    }
    let fresh_items = calculator.calculate(&excellent_metrics()).history_items;

    store.save_items(&old_items).unwrap();
    store.save_items(&fresh_items).unwrap();

    let removed = store
        .prune_items_before(Utc::now() - Duration::days(30))
        .unwrap();
    assert_eq!(removed, 10);

    let remaining = store.items_since(Utc::now() - Duration::days(60)).unwrap();
    assert_eq!(remaining.len(), 10);
}
