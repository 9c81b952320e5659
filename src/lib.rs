//! LAPBENCH - Laptop Benchmark
//!
//! A terminal benchmark that runs a fixed suite of synthetic CPU, memory,
//! hashing and encoding workloads and reports a normalized score.

use thiserror::Error;

pub mod bench;
pub mod config;
pub mod models;
pub mod report;
pub mod util;

// Common error types
#[derive(Debug, Error)]
pub enum BenchError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// A workload could not complete its synthetic work
    #[error("Workload error: {0}")]
    WorkloadError(String),
    /// A parallel worker panicked or could not be joined
    #[error("Worker error: {0}")]
    WorkerError(String),
    /// Run history persistence error
    #[error("Results persistence error: {0}")]
    PersistenceError(String),
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for BenchError {
    fn from(err: toml::de::Error) -> Self {
        BenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for BenchError {
    fn from(err: toml::ser::Error) -> Self {
        BenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

impl From<tokio::task::JoinError> for BenchError {
    fn from(err: tokio::task::JoinError) -> Self {
        BenchError::WorkerError(format!("Task join failed: {}", err))
    }
}

/// Result type alias for LAPBENCH operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Error handling utilities
pub mod error {
    use super::BenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &BenchError) -> String {
        match error {
            BenchError::ConfigError(msg) => {
                format!(
                    "Configuration error: {}. Fix or delete the config file to use defaults.",
                    msg
                )
            }
            BenchError::WorkerError(_) => {
                "A benchmark worker crashed. Close other heavy applications and retry."
                    .to_string()
            }
            BenchError::PersistenceError(_) => {
                "Failed to save run history. Check disk space and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }

    /// Whether the run itself can still be reported after this error
    pub fn is_fatal(error: &BenchError) -> bool {
        !matches!(error, BenchError::PersistenceError(_))
    }
}

// Common types and constants
pub const APP_NAME: &str = "lapbench";
pub const CONFIG_FILE: &str = "lapbench.toml";
pub const HISTORY_FILE: &str = "history.json";
pub const MAX_RESULTS_HISTORY: usize = 100;
