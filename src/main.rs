use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use vitalrs::assistant::{format_context, RuleBasedAssistant};
use vitalrs::config::AppConfig;
use vitalrs::export;
use vitalrs::fitness::FitnessCalculator;
use vitalrs::history::HistoricalAggregator;
use vitalrs::logging::{init_logging, LogConfig, LogLevel};
use vitalrs::models::{
    DailyRawSamples, FitnessLevel, HealthMetrics, WorkoutSummary,
};
use vitalrs::monthly::MonthlyAverager;
use vitalrs::storage::HistoryStore;
use vitalrs::trends::TrendAnalyzer;

/// vitalrs - Wellness Scoring CLI
///
/// Converts biometric data into a composite wellness score, keeps a rolling
/// scoring history, and reports 30-day averages and health trends.
#[derive(Parser)]
#[command(name = "vitalrs")]
#[command(version = "0.1.0")]
#[command(about = "Wellness scoring and health trend analysis", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a metrics snapshot from a JSON file
    Score {
        /// Path to a HealthMetrics JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Persist the generated history items
        #[arg(long)]
        save: bool,
    },

    /// Import multi-day raw samples and store daily scores
    Import {
        /// Path to a raw sample bundle JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show stored scoring history
    History {
        /// How many days back to show
        #[arg(short, long, default_value_t = 30)]
        days: u16,
    },

    /// Show the rolling 30-day average
    Monthly {
        /// Live metrics JSON used as fallback when no history exists
        #[arg(short, long)]
        metrics: Option<PathBuf>,
    },

    /// Classify health trends over a raw sample window
    Trends {
        /// Path to a raw sample bundle JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Ask the assistant about your health data
    Ask {
        /// The question, verbatim
        question: String,

        /// Raw sample bundle JSON for trend context
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Live metrics JSON for current-state context
        #[arg(short, long)]
        metrics: Option<PathBuf>,
    },

    /// Export stored data as CSV
    Export {
        /// What to export: "daily" or "history"
        #[arg(short, long, default_value = "daily")]
        what: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete history items older than the retention window
    Prune,
}

/// On-disk shape of an imported raw sample window
#[derive(Debug, Deserialize)]
struct SampleBundle {
    days: Vec<DailyRawSamples>,
    #[serde(default)]
    workouts: Vec<WorkoutSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: match cli.verbose {
            0 => LogLevel::Warn,
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        },
        ..LogConfig::default()
    };
    let _log_guard = init_logging(&log_config)?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };

    match cli.command {
        Commands::Score { file, save } => cmd_score(&config, &file, save),
        Commands::Import { file } => cmd_import(&config, &file),
        Commands::History { days } => cmd_history(&config, days),
        Commands::Monthly { metrics } => cmd_monthly(&config, metrics.as_deref()),
        Commands::Trends { file } => cmd_trends(&config, &file),
        Commands::Ask {
            question,
            file,
            metrics,
        } => cmd_ask(&config, &question, file.as_deref(), metrics.as_deref()),
        Commands::Export { what, output } => cmd_export(&config, &what, output.as_deref()),
        Commands::Prune => cmd_prune(&config),
    }
}

fn open_store(config: &AppConfig) -> Result<HistoryStore> {
    fs::create_dir_all(&config.settings.data_dir).with_context(|| {
        format!(
            "Failed to create data directory: {}",
            config.settings.data_dir.display()
        )
    })?;
    Ok(HistoryStore::open(config.history_db_path())?)
}

fn load_metrics(path: &std::path::Path) -> Result<HealthMetrics> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metrics file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse metrics file: {}", path.display()))
}

fn load_bundle(path: &std::path::Path) -> Result<SampleBundle> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse sample file: {}", path.display()))
}

#[derive(Tabled)]
struct ScoreRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Points")]
    points: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

#[derive(Tabled)]
struct DailyRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Total")]
    total: u8,
    #[tabled(rename = "Cardio")]
    cardio: u8,
    #[tabled(rename = "Recovery")]
    recovery: u8,
    #[tabled(rename = "Activity")]
    activity: u8,
    #[tabled(rename = "Bonus")]
    bonus: u8,
    #[tabled(rename = "Level")]
    level: String,
}

fn level_colored(level: FitnessLevel) -> ColoredString {
    let text = level.to_string();
    match level {
        FitnessLevel::PeakCondition => text.bright_green(),
        FitnessLevel::StrongActive => text.green(),
        FitnessLevel::ModeratelyFit => text.yellow(),
        FitnessLevel::BuildingUp => text.bright_yellow(),
        FitnessLevel::NeedsFocus => text.red(),
    }
}

fn cmd_score(config: &AppConfig, file: &std::path::Path, save: bool) -> Result<()> {
    let metrics = load_metrics(file)?;
    let calculator = FitnessCalculator::with_policy(config.bonus);
    let result = calculator.calculate(&metrics);

    println!(
        "\n{} {}/100  ({})",
        "Wellness score:".bold(),
        result.total_score,
        level_colored(result.level)
    );
    println!(
        "Cardiovascular {}/30 | Recovery {}/35 | Activity {}/30 | Bonus {}/5\n",
        result.cardiovascular_points,
        result.recovery_points,
        result.activity_points,
        result.bonus_points
    );

    let rows: Vec<ScoreRow> = result
        .history_items
        .iter()
        .map(|item| ScoreRow {
            metric: item.metric.clone(),
            category: item.category.label().to_string(),
            points: format!("{}/{}", item.points, item.max_points),
            reason: item.reason.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));

    if save {
        let mut store = open_store(config)?;
        store.save_items(&result.history_items)?;
        println!("\n{}", "History items saved.".green());
    }

    Ok(())
}

fn cmd_import(config: &AppConfig, file: &std::path::Path) -> Result<()> {
    let bundle = load_bundle(file)?;
    let aggregator =
        HistoricalAggregator::with_calculator(FitnessCalculator::with_policy(config.bonus));
    let scores = aggregator.daily_scores(&bundle.days, &bundle.workouts);

    if scores.is_empty() {
        println!("{}", "No days with data found in the sample window.".yellow());
        return Ok(());
    }

    let mut store = open_store(config)?;
    for score in &scores {
        store.save_daily_score(score)?;
        store.save_items(&score.history_items)?;
    }

    println!(
        "Imported {} scored days out of {} in the window.",
        scores.len().to_string().green(),
        bundle.days.len()
    );

    let rows: Vec<DailyRow> = scores
        .iter()
        .map(|s| DailyRow {
            date: s.date.to_string(),
            total: s.total_score,
            cardio: s.cardiovascular_points,
            recovery: s.recovery_points,
            activity: s.activity_points,
            bonus: s.bonus_points,
            level: s.level.to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));

    Ok(())
}

fn cmd_history(config: &AppConfig, days: u16) -> Result<()> {
    let store = open_store(config)?;
    let cutoff = Utc::now() - chrono::Duration::days(days as i64);
    let items = store.items_since(cutoff)?;

    if items.is_empty() {
        println!("No history items in the last {} days.", days);
        return Ok(());
    }

    let rows: Vec<ScoreRow> = items
        .iter()
        .map(|item| ScoreRow {
            metric: item.metric.clone(),
            category: item.category.label().to_string(),
            points: format!("{}/{}", item.points, item.max_points),
            reason: item.reason.clone(),
        })
        .collect();
    println!("{}", Table::new(rows));
    println!("{} items.", items.len());

    Ok(())
}

fn cmd_monthly(config: &AppConfig, metrics_path: Option<&std::path::Path>) -> Result<()> {
    let store = open_store(config)?;
    let cutoff = (Utc::now() - config.history_window()).date_naive();
    let scores = store.daily_scores_since(cutoff)?;

    let current = match metrics_path {
        Some(path) => load_metrics(path)?,
        None => HealthMetrics::empty(),
    };

    let averager = MonthlyAverager::with_calculator(FitnessCalculator::with_policy(config.bonus));
    let result = averager.from_daily_scores(&scores, &current);

    println!(
        "\n{} {}/100  ({})",
        "30-day average:".bold(),
        result.total_score,
        level_colored(result.level)
    );
    println!(
        "Cardiovascular {:.1}/30 | Recovery {:.1}/35 | Activity {:.1}/30 | Bonus {:.1}/5",
        result.cardiovascular_avg, result.recovery_avg, result.activity_avg, result.bonus_avg
    );
    if result.is_estimated {
        println!(
            "{}",
            "Estimated from the current snapshot; no stored daily scores in the window."
                .yellow()
        );
    } else {
        println!("Based on {} daily scores.", result.data_points_count);
    }

    Ok(())
}

fn cmd_trends(config: &AppConfig, file: &std::path::Path) -> Result<()> {
    let bundle = load_bundle(file)?;
    let aggregator =
        HistoricalAggregator::with_calculator(FitnessCalculator::with_policy(config.bonus));
    let mut window = aggregator.daily_metrics(&bundle.days, &bundle.workouts);
    window.sort_by_key(|d| d.date);

    let summary = TrendAnalyzer::with_config(config.trend).summarize(&window);

    println!("\n{}", "Health trends over the window:".bold());
    for (name, trend) in [
        ("Heart health", summary.heart),
        ("Sleep", summary.sleep),
        ("Activity", summary.activity),
    ] {
        let label = match trend {
            vitalrs::models::Trend::Improving => trend.to_string().green(),
            vitalrs::models::Trend::Stable => trend.to_string().normal(),
            vitalrs::models::Trend::Declining => trend.to_string().red(),
        };
        println!("  {:<14} {}", name, label);
    }

    Ok(())
}

fn cmd_ask(
    config: &AppConfig,
    question: &str,
    file: Option<&std::path::Path>,
    metrics_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut store = open_store(config)?;

    if let Some(reply) = store.cached_reply(question, config.reply_cache_window())? {
        println!("{}", reply);
        return Ok(());
    }

    let current = match metrics_path {
        Some(path) => load_metrics(path)?,
        None => HealthMetrics::empty(),
    };

    let calculator = FitnessCalculator::with_policy(config.bonus);
    let cutoff = (Utc::now() - config.history_window()).date_naive();
    let scores = store.daily_scores_since(cutoff)?;
    let monthly =
        MonthlyAverager::with_calculator(calculator.clone()).from_daily_scores(&scores, &current);

    let trends = match file {
        Some(path) => {
            let bundle = load_bundle(path)?;
            let aggregator = HistoricalAggregator::with_calculator(calculator);
            let mut window = aggregator.daily_metrics(&bundle.days, &bundle.workouts);
            window.sort_by_key(|d| d.date);
            TrendAnalyzer::with_config(config.trend).summarize(&window)
        }
        None => vitalrs::models::TrendSummary::all_stable(),
    };

    tracing::debug!(
        context_len = format_context(&monthly, &current, &trends).len(),
        "assistant context assembled"
    );

    let reply = RuleBasedAssistant::new().answer(question, &monthly, &current, &trends);
    store.store_reply(question, &reply)?;
    println!("{}", reply);

    Ok(())
}

fn cmd_export(config: &AppConfig, what: &str, output: Option<&std::path::Path>) -> Result<()> {
    let store = open_store(config)?;
    let cutoff_dt = Utc::now() - config.history_window();

    let mut buf: Vec<u8> = Vec::new();
    match what {
        "daily" => {
            let scores = store.daily_scores_since(cutoff_dt.date_naive())?;
            export::write_daily_scores_csv(&scores, &mut buf)?;
        }
        "history" => {
            let items = store.items_since(cutoff_dt)?;
            export::write_history_csv(&items, &mut buf)?;
        }
        other => anyhow::bail!("Unknown export target: {} (use \"daily\" or \"history\")", other),
    }

    match output {
        Some(path) => {
            fs::write(path, &buf)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}.", path.display());
        }
        None => print!("{}", String::from_utf8_lossy(&buf)),
    }

    Ok(())
}

fn cmd_prune(config: &AppConfig) -> Result<()> {
    let store = open_store(config)?;
    let cutoff = Utc::now() - config.history_window();
    let removed = store.prune_items_before(cutoff)?;
    println!("Removed {} expired history items.", removed);
    Ok(())
}
