// src/error.rs

//! Unified error handling for the trend engine.

use std::fmt;

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required document is missing or the store refused to serve it
    #[error("Fetch error for {key}: {message}")]
    Fetch { key: String, message: String },

    /// A document was served but could not be decoded
    #[error("Parse error for {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a fetch error for a document key.
    pub fn fetch(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error for a document key.
    pub fn parse(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            key: key.into(),
            source,
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error means the document simply is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Fetch { message, .. } if message == NOT_FOUND)
    }
}

/// Message used for fetch errors caused by a missing document.
pub(crate) const NOT_FOUND: &str = "document not found";
