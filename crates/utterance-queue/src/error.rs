//! Error types for the utterance queue

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while building utterances, configuring the queue,
/// or managing the drain task.
///
/// Enqueueing and draining never fail; only construction, configuration and
/// driver lifecycle surface errors.
#[derive(Debug, Error)]
pub enum UtteranceError {
    /// An utterance was built without any alert text
    #[error("Utterance must contain at least one alert")]
    EmptyAlert,

    /// The drain interval must be strictly positive
    #[error("Invalid drain interval: {0:?}")]
    InvalidInterval(Duration),

    /// The drain task is already running
    #[error("Queue driver is already running")]
    AlreadyRunning,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl UtteranceError {
    /// Create a new Config error with context
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type for utterance queue operations
pub type Result<T> = std::result::Result<T, UtteranceError>;
