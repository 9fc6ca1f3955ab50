//! Core data structures shared by the reader, the pipeline and the job runner.
//!
//! Defines the supported file formats, job statistics and table summaries.

use crate::error::{CleanError, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File formats a table can be read from or written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
    Parquet,
}

impl FileFormat {
    pub const ALL: [FileFormat; 4] = [
        FileFormat::Csv,
        FileFormat::Xlsx,
        FileFormat::Xls,
        FileFormat::Parquet,
    ];

    /// Detect format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();
        extension.parse()
    }

    /// Resolve an explicit override, falling back to the path's extension
    pub fn resolve(path: &Path, format_override: Option<FileFormat>) -> Result<Self> {
        match format_override {
            Some(format) => Ok(format),
            None => Self::from_path(path),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Xls => "xls",
            FileFormat::Parquet => "parquet",
        }
    }

    /// True for spreadsheet workbook containers
    pub fn is_workbook(self) -> bool {
        matches!(self, FileFormat::Xlsx | FileFormat::Xls)
    }
}

impl FromStr for FileFormat {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            "xls" => Ok(FileFormat::Xls),
            "parquet" => Ok(FileFormat::Parquet),
            _ => Err(CleanError::unsupported_format(s.trim())),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Row counts for one cleaning job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    pub input_rows: usize,
    pub output_rows: usize,
    pub rows_removed: usize,
}

impl JobStats {
    pub fn new(input_rows: usize, output_rows: usize) -> Self {
        Self {
            input_rows,
            output_rows,
            rows_removed: input_rows.saturating_sub(output_rows),
        }
    }

    /// Percentage of input rows removed by the pipeline
    pub fn removal_rate(&self) -> f64 {
        if self.input_rows == 0 {
            0.0
        } else {
            (self.rows_removed as f64 / self.input_rows as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} -> {} rows ({} removed, {:.1}%)",
            self.input_rows,
            self.output_rows,
            self.rows_removed,
            self.removal_rate()
        )
    }
}

/// Shape and leading rows of a table, as reported by `inspect`
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub format: FileFormat,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub preview: DataFrame,
}
