// src/error.rs

//! Unified error handling for the feed watcher.
//!
//! Only conditions that must abort a run surface as [`AppError`]. Transport
//! failures, upstream schema drift and webhook rejections are absorbed by the
//! component that meets them.

use thiserror::Error;

/// Result type alias for broadcast operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration value rejected by validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Feed history could not be read or written
    #[error("History error: {0}")]
    History(String),
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

    /// Create a history error.
    pub fn history(message: impl Into<String>) -> Self {
        Self::History(message.into())
    }

    /// Whether this error is an HTTP timeout.
    ///
    /// Timeouts are routine against the upstream feed and are logged at a
    /// lower severity than other transport failures.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
