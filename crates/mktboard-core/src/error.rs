//! Error types for mktboard-core
//!
//! Nothing in the dashboard core is fatal to the page: callers either show
//! the message to the user (range validation) or fall back to defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Which bound of a custom date range was left empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
    Both,
}

impl std::fmt::Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::Start => write!(f, "start date"),
            RangeBound::End => write!(f, "end date"),
            RangeBound::Both => write!(f, "start and end dates"),
        }
    }
}

/// Core error type for mktboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid date '{input}' (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    // ===================
    // Range Errors
    // ===================
    #[error("Please select both start and end dates (missing {missing})")]
    IncompleteRange { missing: RangeBound },

    #[error("End date {end} is before start date {start}")]
    InvertedRange { start: String, end: String },

    #[error("Invalid range '{input}' (expected 7d, 30d, 60d, 90d or all)")]
    InvalidRange { input: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CoreError {
    /// True for errors caused by user input rather than the environment
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidDate { .. }
                | CoreError::IncompleteRange { .. }
                | CoreError::InvertedRange { .. }
                | CoreError::InvalidRange { .. }
        )
    }
}
