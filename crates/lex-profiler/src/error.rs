//! Custom error types for the dataset profiler.
//!
//! This module provides the error hierarchy for acquiring and profiling a
//! dataset using `thiserror`. Profiling itself degrades to smaller records
//! instead of failing, so most variants belong to dataset acquisition.
//!
//! Errors are serializable so they can be forwarded to a frontend as
//! `{ "code", "message" }` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// Why a path-like input could not be used as a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnusableReason {
    /// Nothing exists at the path.
    NotFound,
    /// The path exists but is not a regular file.
    NotAFile,
    /// The file does not carry a `.csv` extension.
    NotCsv,
}

impl std::fmt::Display for UnusableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NotFound => "file does not exist",
            Self::NotAFile => "path is not a regular file",
            Self::NotCsv => "file is not a .csv file",
        };
        f.write_str(text)
    }
}

/// The main error type for the profiler.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// Input is neither a recognized table nor a path.
    #[error("Invalid input type: {0}. Input must be a table or a path to a CSV file")]
    InvalidInputType(String),

    /// A path was given but it does not point to a readable CSV file.
    #[error("Unreadable source '{}': {reason}", path.display())]
    UnreadableSource {
        path: PathBuf,
        reason: UnusableReason,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ProfilingError>,
    },
}

impl ProfilingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ProfilingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInputType(_) => "INVALID_INPUT_TYPE",
            Self::UnreadableSource { .. } => "UNREADABLE_SOURCE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if the caller can recover by supplying different input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidInputType(_) | Self::UnreadableSource { .. } | Self::InvalidConfig(_) => {
                true
            }
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for ProfilingError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        ProfilingError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ProfilingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ProfilingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfilingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ProfilingError::Polars(e).with_context(context))
    }
}
