use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bonus::BonusPolicy;
use crate::trends::TrendConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,

    /// Bonus eligibility policy
    pub bonus: BonusPolicy,

    /// Trend classification policy
    pub trend: TrendConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Data directory holding the history database
    pub data_dir: PathBuf,

    /// Rolling history retention window in days
    pub history_window_days: u16,

    /// Freshness window for cached assistant replies, in hours
    pub reply_cache_hours: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: "1".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
            bonus: BonusPolicy::default(),
            trend: TrendConfig::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vitalrs"),
            history_window_days: 30,
            reply_cache_hours: 12,
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitalrs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        let config_path = Self::default_config_path();
        match Self::load_from_file(&config_path) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    /// Path of the history database inside the data directory
    pub fn history_db_path(&self) -> PathBuf {
        self.settings.data_dir.join("history.db")
    }

    /// Retention window as a chrono duration
    pub fn history_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.settings.history_window_days as i64)
    }

    /// Reply cache freshness window as a chrono duration
    pub fn reply_cache_window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.settings.reply_cache_hours as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_carry_policy_constants() {
        let config = AppConfig::default();
        assert_eq!(config.settings.history_window_days, 30);
        assert_eq!(config.bonus.excellence_threshold_pct, 75.0);
        assert_eq!(config.trend.change_threshold_pct, 5.0);
        assert_eq!(config.trend.min_entries, 14);
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.settings.history_window_days = 45;
        config.trend.change_threshold_pct = 7.5;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.settings.history_window_days, 45);
        assert_eq!(loaded.trend.change_threshold_pct, 7.5);
        assert_eq!(loaded.bonus.excellence_threshold_pct, 75.0);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(AppConfig::load_from_file("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn test_history_db_path() {
        let mut config = AppConfig::default();
        config.settings.data_dir = PathBuf::from("/tmp/vitalrs-test");
        assert_eq!(
            config.history_db_path(),
            PathBuf::from("/tmp/vitalrs-test/history.db")
        );
    }
}
