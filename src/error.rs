//! Error types for the fairway extraction engine.
//!
//! Extraction itself never fails: every email yields a fully formed
//! [`BookingExtraction`](crate::BookingExtraction), with missing fields left
//! unset and reflected only in lower confidence. Errors exist only at the
//! configuration and feedback-ledger boundaries.

use thiserror::Error;

/// Main error type for fairway operations.
#[derive(Error, Debug)]
pub enum FairwayError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Feedback-ledger errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to create ledger directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("Failed to read feedback log: {0}")]
    ReadLog(#[source] std::io::Error),

    #[error("Failed to write feedback log: {0}")]
    WriteLog(#[source] std::io::Error),

    #[error("Malformed feedback record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    #[error("No feedback record for booking: {0}")]
    BookingNotFound(String),
}

/// Result type alias for fairway operations.
pub type Result<T> = std::result::Result<T, FairwayError>;
