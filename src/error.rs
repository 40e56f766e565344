//! Error types for ecom-synth.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for ecom-synth operations.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Database connection errors (missing file, locked database, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, unknown tables, timeouts, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, unreadable query file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset generation errors (empty reference tables, date overflow, etc.)
    #[error("Generation error: {0}")]
    Generation(String),

    /// Output errors (CSV files that cannot be created or written)
    #[error("Output error: {0}")]
    Output(String),
}

impl SynthError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a generation error with the given message.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Creates an output error with the given message.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Generation(_) => "Generation Error",
            Self::Output(_) => "Output Error",
        }
    }
}

/// Result type alias using SynthError.
pub type Result<T> = std::result::Result<T, SynthError>;
