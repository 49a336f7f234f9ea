//! CSV export of daily scores and history items
//!
//! Writes flat, analysis-ready tables: one row per daily score or history
//! item, explicit headers, no nested structure.

use crate::error::Result;
use crate::models::{DailyFitnessScore, HistoryItem};
use csv::Writer;
use std::io::Write;

/// Write daily scores as CSV, one row per day.
pub fn write_daily_scores_csv<W: Write>(scores: &[DailyFitnessScore], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    writer.write_record([
        "date",
        "total_score",
        "cardiovascular_points",
        "recovery_points",
        "activity_points",
        "bonus_points",
        "level",
    ])?;

    for score in scores {
        writer.write_record([
            score.date.to_string(),
            score.total_score.to_string(),
            score.cardiovascular_points.to_string(),
            score.recovery_points.to_string(),
            score.activity_points.to_string(),
            score.bonus_points.to_string(),
            score.level.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write history items as CSV, one row per item.
pub fn write_history_csv<W: Write>(items: &[HistoryItem], out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    writer.write_record([
        "timestamp",
        "category",
        "metric",
        "points",
        "max_points",
        "reason",
    ])?;

    for item in items {
        writer.write_record([
            item.timestamp.to_rfc3339(),
            item.category.label().to_string(),
            item.metric.clone(),
            item.points.to_string(),
            item.max_points.to_string(),
            item.reason.clone(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitnessLevel, ScoreCategory, ScoringResult};
    use chrono::NaiveDate;

    #[test]
    fn test_daily_scores_csv() {
        let scores = vec![DailyFitnessScore {
            date: NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
            total_score: 72,
            cardiovascular_points: 22,
            recovery_points: 25,
            activity_points: 22,
            bonus_points: 3,
            level: FitnessLevel::StrongActive,
            history_items: Vec::new(),
        }];

        let mut buf = Vec::new();
        write_daily_scores_csv(&scores, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,total_score,cardiovascular_points,recovery_points,activity_points,bonus_points,level"
        );
        assert_eq!(lines.next().unwrap(), "2025-05-10,72,22,25,22,3,Strong & Active");
    }

    #[test]
    fn test_history_csv_quotes_reasons() {
        let items = vec![HistoryItem::from_result(
            ScoreCategory::Recovery,
            "Deep Sleep",
            ScoringResult {
                points: 9,
                reason: "Good deep sleep share".to_string(),
            },
            12,
        )];

        let mut buf = Vec::new();
        write_history_csv(&items, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("timestamp,category,metric,points,max_points,reason\n"));
        assert!(csv.contains("Recovery & Regeneration"));
        assert!(csv.contains("Deep Sleep,9,12,Good deep sleep share"));
    }

    #[test]
    fn test_empty_input_writes_header_only() {
        let mut buf = Vec::new();
        write_daily_scores_csv(&[], &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
