// CLI error types

use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("Line {line}: {message}")]
    InvalidArgument { line: usize, message: String },

    #[error("Queue error: {0}")]
    Queue(#[from] utterance_queue::UtteranceError),
}

impl CliError {
    /// Create an InvalidArgument error for a script line
    pub fn invalid_argument(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            line,
            message: message.into(),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
