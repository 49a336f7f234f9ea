// Library interface for the vitalrs wellness scoring engine
// This allows integration tests to access the core functionality

pub mod assistant;
pub mod bonus;
pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod fitness;
pub mod history;
pub mod logging;
pub mod models;
pub mod monthly;
pub mod scoring;
pub mod sleep;
pub mod storage;
pub mod thresholds;
pub mod trends;

// Re-export commonly used types for convenience
pub use bonus::{evaluate_bonus, BonusPolicy, BonusResult};
pub use error::{Result, VitalError};
pub use fitness::FitnessCalculator;
pub use history::HistoricalAggregator;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use models::*;
pub use monthly::MonthlyAverager;
pub use storage::HistoryStore;
pub use trends::{TrendAnalyzer, TrendConfig};
