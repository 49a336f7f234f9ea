//! Unified error hierarchy for vitalrs
//!
//! The scoring core itself never fails on metric values — missing or
//! out-of-range readings take the defined "no data" branches instead. Errors
//! exist for the ambient layers: storage, configuration, and import/export.

use thiserror::Error;

use crate::storage::StorageError;

/// Top-level error type for all vitalrs operations
#[derive(Debug, Error)]
pub enum VitalError {
    /// History store operation errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input (metrics snapshots, sample bundles)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input data that parses but violates the data contracts
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration load/save errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for vitalrs operations
pub type Result<T> = std::result::Result<T, VitalError>;

impl VitalError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VitalError::Validation(_) => ErrorSeverity::Warning,
            VitalError::Json(_) | VitalError::Csv(_) => ErrorSeverity::Warning,
            VitalError::Configuration(_) => ErrorSeverity::Error,
            VitalError::Storage(_) | VitalError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VitalError::Json(e) => {
                format!("Could not parse the input file: {}", e)
            }
            VitalError::Storage(StorageError::NotFound(what)) => {
                format!("No stored data found for {}", what)
            }
            VitalError::Configuration(reason) => {
                format!("Configuration problem: {}", reason)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but the process can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = VitalError::Validation("negative step count".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = VitalError::Configuration("missing data dir".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = VitalError::Storage(StorageError::NotFound("daily scores".to_string()));
        assert!(err.user_message().contains("No stored data"));

        let err = VitalError::Configuration("bad path".to_string());
        assert!(err.user_message().contains("Configuration problem"));
    }
}
