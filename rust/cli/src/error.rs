//! Error types for the CLI application.
//!
//! This module defines the error types used throughout the CLI for better
//! error propagation and handling.
//!
//! ## Batch Validation Errors
//!
//! The `BatchValidationError<T>` type collects per-item failures with context.
//! `replay` uses it to report every recorded hand that did not reproduce.

use crate::config::ConfigError;
use majiang_engine::errors::GameError;
use std::fmt;

/// Custom error type for CLI operations.
///
/// This enum encompasses all error types that can occur during CLI execution,
/// allowing for proper error propagation using the `?` operator.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The engine rejected a command
    Engine(GameError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// Generic error type for batch validation operations.
///
/// Each error tracks the item that failed and a descriptive message.
///
/// # Type Parameters
///
/// * `T` - Context type identifying the failed item (e.g., `usize` for a
///   line number, `String` for a hand id). Must implement `Display`.
///
/// # Examples
///
/// ```rust
/// use majiang_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: "20250101-000003".to_string(),
///     message: "outcome differs".to_string(),
/// };
/// assert_eq!(error.to_string(), "20250101-000003: outcome differs");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}
