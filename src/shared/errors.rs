//! Error handling for the application

use thiserror::Error;

/// Quote source errors
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("quote API returned status {0}")]
    BadStatus(reqwest::StatusCode),

    #[error("unexpected response shape: missing {0}")]
    MissingField(String),
}

/// Messaging sink errors
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("telegram returned status {status}: {body}")]
    BadStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("telegram rejected the call: {0}")]
    Rejected(String),

    #[error("could not read photo {path}: {source}")]
    PhotoRead {
        path: String,
        source: std::io::Error,
    },
}

/// History log errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed history row at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Top-level monitor error, one variant per failure class
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}
