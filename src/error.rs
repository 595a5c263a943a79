//! Error types for fitloop
//!
//! Every fallible operation in the crate returns [`Result`]. Errors raised by
//! callbacks travel through the run driver unchanged.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for fitloop operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running a trainer.
#[derive(Error, Debug)]
pub enum Error {
    /// Training was requested before an optimizer was attached.
    #[error("Model is not compiled: no optimizer attached\n  → Call Trainer::compile before fit")]
    NotCompiled,

    /// Input rows or weights do not match the model's expected shape.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A run was started on a dataset without rows.
    #[error("Dataset is empty\n  → Provide at least one sample")]
    EmptyDataset,

    /// A learning rate was negative or not finite.
    #[error("Invalid learning rate: {0} (must be finite and >= 0.0)")]
    InvalidLearningRate(f64),

    /// Run parameters are inconsistent.
    #[error("Invalid run configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file failed validation.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// IO error with context.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV read or write failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A callback refused to continue.
    #[error("Callback '{name}' failed: {message}")]
    Callback { name: String, message: String },
}

impl Error {
    /// Create an IO error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a callback error.
    pub fn callback(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Callback {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Check if this error comes from user input rather than a run failure.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::InvalidConfig(_) | Self::EmptyDataset
        )
    }
}
