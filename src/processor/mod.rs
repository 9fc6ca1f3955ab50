//! Job runner: read, clean and write one table.
//!
//! A job is strictly sequential. The output file is only written once the
//! whole cleaned table exists in memory, so a failure while reading or
//! cleaning never leaves a partial output behind.

#[cfg(test)]
pub mod tests;

use crate::config::{CleaningConfig, WriteOptions};
use crate::constants::MAX_PREVIEW_ROWS;
use crate::error::Result;
use crate::formats::{read_table, write_table, xls_write_unsupported};
use crate::models::{FileFormat, JobStats, TableSummary};
use crate::pipeline::{DataCleaner, StageReport};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Input and output locations of a cleaning job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub input_format: Option<FileFormat>,
    pub output_format: Option<FileFormat>,
}

impl JobRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            input_format: None,
            output_format: None,
        }
    }

    pub fn with_input_format(mut self, format: Option<FileFormat>) -> Self {
        self.input_format = format;
        self
    }

    pub fn with_output_format(mut self, format: Option<FileFormat>) -> Self {
        self.output_format = format;
        self
    }
}

/// Outcome of a job, with the per-stage breakdown behind the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobOutcome {
    pub stats: JobStats,
    pub report: StageReport,
}

/// Run a job and return its row counts
pub fn run_job(
    request: &JobRequest,
    config: &CleaningConfig,
    options: &WriteOptions,
) -> Result<JobStats> {
    run_job_with_report(request, config, options).map(|outcome| outcome.stats)
}

/// Run a job, also returning the rows removed by each pipeline stage
///
/// # Errors
///
/// Fails before reading when either format cannot be resolved or the
/// output format cannot be written; otherwise propagates the first read,
/// clean or write error.
pub fn run_job_with_report(
    request: &JobRequest,
    config: &CleaningConfig,
    options: &WriteOptions,
) -> Result<JobOutcome> {
    let start = Instant::now();

    let input_format = FileFormat::resolve(&request.input, request.input_format)?;
    let output_format = FileFormat::resolve(&request.output, request.output_format)?;
    if output_format == FileFormat::Xls {
        return Err(xls_write_unsupported());
    }
    debug!(
        "Job {} ({}) -> {} ({})",
        request.input.display(),
        input_format,
        request.output.display(),
        output_format
    );

    let raw = read_table(&request.input, Some(input_format))?;
    let (cleaned, report) = DataCleaner::new(config.clone()).clean_with_report(&raw)?;
    write_table(&cleaned, &request.output, Some(output_format), options)?;

    let stats = JobStats::new(raw.height(), cleaned.height());
    info!(
        "Job finished in {:.2}s: {}",
        start.elapsed().as_secs_f64(),
        stats.summary()
    );
    Ok(JobOutcome { stats, report })
}

/// Convenience wrapper around [`run_job`] with default write options
pub fn run(
    input: &Path,
    output: &Path,
    config: &CleaningConfig,
    input_format: Option<FileFormat>,
    output_format: Option<FileFormat>,
) -> Result<JobStats> {
    let request = JobRequest::new(input, output)
        .with_input_format(input_format)
        .with_output_format(output_format);
    run_job(&request, config, &WriteOptions::default())
}

/// Read a table and summarize its shape and leading rows
///
/// `limit` is capped at 500 preview rows.
pub fn inspect(source: &Path, format: Option<FileFormat>, limit: usize) -> Result<TableSummary> {
    let format = FileFormat::resolve(source, format)?;
    let df = read_table(source, Some(format))?;

    let columns = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    Ok(TableSummary {
        format,
        row_count: df.height(),
        columns,
        preview: df.head(Some(limit.min(MAX_PREVIEW_ROWS))),
    })
}
