//! Error types with actionable diagnostics.
//!
//! Every variant names the offending input and ends with a `→` hint line so
//! the CLI can print the error verbatim.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for evaluar operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors raised while validating inputs or computing metrics.
#[derive(Error, Debug)]
pub enum EvalError {
    /// `y_true` and `y_pred` differ in length.
    #[error("Found input label sequences with inconsistent lengths: y_true has {y_true}, y_pred has {y_pred}\n  → Both sequences must hold one label per sample")]
    LengthMismatch { y_true: usize, y_pred: usize },

    /// No samples were given.
    #[error("Found label sequences with 0 samples\n  → At least one sample is required to compute {metric}")]
    EmptyInput { metric: &'static str },

    /// The explicit `labels` list is unusable.
    #[error("Invalid labels: {message}\n  → Pass a non-empty list of distinct labels, at least one of which occurs in y_true")]
    InvalidLabels { message: String },

    /// `target_names` does not line up with the report labels.
    #[error("Number of classes, {n_labels}, does not match size of target_names, {n_names}\n  → Try specifying the labels parameter")]
    TargetNamesMismatch { n_labels: usize, n_names: usize },

    /// A metric parameter is out of range or incompatible with the data.
    #[error("Invalid value for '{parameter}': {message}")]
    InvalidParameter { parameter: &'static str, message: String },

    /// Configuration file not found.
    #[error("Configuration file not found: {path}\n  → Create the file or drop --config")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML/JSON syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue {
        field: String,
        message: String,
        suggestion: String,
    },

    /// A label file could not be interpreted.
    #[error("Cannot read labels from {path}: {message}\n  → Use one label per line, comma-separated labels, or a JSON array")]
    LabelFile { path: PathBuf, message: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl EvalError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn invalid_labels(message: impl Into<String>) -> Self {
        Self::InvalidLabels {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Io { .. } | Self::Serialization { .. })
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "E001",
            Self::EmptyInput { .. } => "E002",
            Self::InvalidLabels { .. } => "E003",
            Self::TargetNamesMismatch { .. } => "E004",
            Self::InvalidParameter { .. } => "E005",
            Self::ConfigNotFound { .. } => "E010",
            Self::ConfigParsing { .. } => "E011",
            Self::ConfigValue { .. } => "E012",
            Self::LabelFile { .. } => "E020",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
