// src/error.rs

//! Unified error handling for the notifier.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Result type alias for notifier operations.
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

    /// Configuration error (missing credentials, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config value validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Login was rejected or returned no token
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Reading list request failed
    #[error("Fetch error for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Push notification failed
    #[error("Notification error for {context}: {message}")]
    Notify { context: String, message: String },

    /// State file could not be read or written
    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },
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

    /// Create an authentication error.
    pub fn auth(message: impl fmt::Display) -> Self {
        Self::Auth(message.to_string())
    }

    /// Create a fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a notification error with context.
    pub fn notify(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Notify {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a storage error for a file path.
    pub fn storage(path: &Path, message: impl fmt::Display) -> Self {
        Self::Storage {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}
