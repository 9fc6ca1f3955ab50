//! Error handling for cleaning jobs.
//!
//! Provides error types with context for configuration, file format,
//! container-level I/O and schema validation failures. Row-level data
//! problems are never errors; they are filtered out by the pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unsupported format '{format}'. Supported: csv, xlsx/xls, parquet")]
    UnsupportedFormat { format: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("Missing required columns: {columns:?}")]
    MissingColumns { columns: Vec<String> },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Coarse classification used by callers that map failures onto
/// transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller supplied something invalid (4xx in an HTTP surface)
    Validation,
    /// Filesystem, container or frame failure (5xx in an HTTP surface)
    Io,
}

impl CleanError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    pub fn read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Read {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            CleanError::Configuration { .. }
            | CleanError::UnsupportedFormat { .. }
            | CleanError::MissingColumns { .. } => ErrorClass::Validation,
            CleanError::Io(_)
            | CleanError::Read { .. }
            | CleanError::Write { .. }
            | CleanError::Polars(_) => ErrorClass::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, CleanError>;
