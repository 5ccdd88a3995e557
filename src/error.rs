//! Error types module.
//!
//! This module defines the error types used throughout the dnsbench application.
//! It uses `thiserror` for structured error handling and provides
//! a custom `Result` type alias for convenience.

use crate::stats::StatsError;
use thiserror::Error;

/// A specialized `Result` type for dnsbench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for dnsbench application.
///
/// Each variant represents a different category of error that can occur
/// while configuring, running, or reporting a benchmark.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (configuration files, terminal output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (configuration files, JSON output)
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS resolver error (resolver construction and query failures)
    #[error("DNS resolver error: {0}")]
    Resolver(#[from] trust_dns_resolver::error::ResolveError),

    /// Aggregation failed
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// Configuration error (invalid config, missing files)
    #[error("Config error: {0}")]
    Config(String),

    /// Parse error (invalid input format, malformed data)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<color_eyre::Report> for Error {
    fn from(e: color_eyre::Report) -> Self {
        Self::Config(e.to_string())
    }
}
