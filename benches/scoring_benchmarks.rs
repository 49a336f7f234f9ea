use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vitalrs::fitness::FitnessCalculator;
use vitalrs::history::HistoricalAggregator;
use vitalrs::models::{
    DailyRawSamples, HealthMetrics, HeartRateSample, HrvSample, SleepStage, SleepStageSample,
    StepsSample, WorkoutSummary,
};
use vitalrs::monthly::MonthlyAverager;
use vitalrs::trends::TrendAnalyzer;

fn snapshot() -> HealthMetrics {
    HealthMetrics {
        resting_heart_rate: 58.0,
        heart_rate_variability: 52.0,
        vo2_max: 44.0,
        deep_sleep_pct: 18.0,
        rem_sleep_pct: 22.0,
        sleep_consistency: 80.0,
        training_minutes_per_day: 35.0,
        training_intensity: 70.0,
        daily_steps: 9_500,
    }
}

fn thirty_day_window() -> (Vec<DailyRawSamples>, Vec<WorkoutSummary>) {
    let days = (1..=30u32)
        .map(|d| {
            let date = NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
            let night = Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap();
            let morning = Utc.with_ymd_and_hms(2025, 6, d, 7, 0, 0).unwrap();
            DailyRawSamples {
                date,
                steps: (0..24)
                    .map(|h| StepsSample {
                        timestamp: morning + Duration::hours(h),
                        count: 400,
                    })
                    .collect(),
                heart_rate: (0..96)
                    .map(|i| HeartRateSample {
                        timestamp: night + Duration::minutes(i * 15),
                        bpm: 55.0 + (i % 7) as f64,
                    })
                    .collect(),
                hrv: (0..8)
                    .map(|i| HrvSample {
                        timestamp: night + Duration::hours(i),
                        sdnn_ms: 48.0 + (i % 5) as f64,
                    })
                    .collect(),
                sleep: vec![
                    SleepStageSample {
                        stage: SleepStage::Light,
                        start: night,
                        end: night + Duration::minutes(240),
                    },
                    SleepStageSample {
                        stage: SleepStage::Deep,
                        start: night + Duration::minutes(240),
                        end: night + Duration::minutes(330),
                    },
                    SleepStageSample {
                        stage: SleepStage::Rem,
                        start: night + Duration::minutes(330),
                        end: night + Duration::minutes(430),
                    },
                ],
            }
        })
        .collect();

    let workouts = (1..=30u32)
        .map(|d| WorkoutSummary {
            date: NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
            duration_minutes: 35.0,
            intensity: 70.0,
        })
        .collect();

    (days, workouts)
}

fn bench_fitness_score(c: &mut Criterion) {
    let calculator = FitnessCalculator::new();
    let metrics = snapshot();

    c.bench_function("fitness_score_single_snapshot", |b| {
        b.iter(|| calculator.calculate(black_box(&metrics)))
    });
}

fn bench_historical_aggregation(c: &mut Criterion) {
    let aggregator = HistoricalAggregator::new();
    let (days, workouts) = thirty_day_window();

    c.bench_function("historical_aggregation_30_days", |b| {
        b.iter(|| aggregator.daily_scores(black_box(&days), black_box(&workouts)))
    });
}

fn bench_monthly_and_trends(c: &mut Criterion) {
    let aggregator = HistoricalAggregator::new();
    let (days, workouts) = thirty_day_window();
    let scores = aggregator.daily_scores(&days, &workouts);
    let mut window = aggregator.daily_metrics(&days, &workouts);
    window.sort_by_key(|d| d.date);
    let current = snapshot();

    c.bench_function("monthly_average_30_days", |b| {
        let averager = MonthlyAverager::new();
        b.iter(|| averager.from_daily_scores(black_box(&scores), black_box(&current)))
    });

    c.bench_function("trend_classification_30_days", |b| {
        let analyzer = TrendAnalyzer::new();
        b.iter(|| analyzer.summarize(black_box(&window)))
    });
}

criterion_group!(
    benches,
    bench_fitness_score,
    bench_historical_aggregation,
    bench_monthly_and_trends
);
criterion_main!(benches);
