// src/error.rs

//! Unified error handling for the menu pipeline.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch exceeded the hard timeout and the in-flight request was cancelled
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream responded with a non-2xx status
    #[error("HTTP status {0}")]
    Http(reqwest::StatusCode),

    /// Connection-level failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Cache read/write failed (non-fatal; must never block rendering)
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Regex compilation failed (parser patterns are built from config)
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl fmt::Display) -> Self {
        Self::Storage(message.to_string())
    }

    /// True for failures surfaced by the fetch gateway.
    ///
    /// The scheduler applies the cache-precedence rule to these: an
    /// existing cached render stays in place, fallback is shown only
    /// when no cache exists.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Http(_) | Self::Network(_))
    }
}
