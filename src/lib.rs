//! Shift telemetry cleaning library
//!
//! Cleans production-machine telemetry tables (one row per machine, shift
//! and style run) and derives machine efficiency.
//!
//! This library provides tools for:
//! - Reading and writing tables as CSV, Excel workbooks or Parquet
//! - Normalizing the line-broken headers of shop-floor exports
//! - Coercing dates, RPM readings and runtime durations, dropping rows that
//!   cannot be parsed
//! - Filtering RPM outliers, multi-style shifts and implausible efficiency
//! - Running whole read, clean and write jobs with row statistics

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod models;
pub mod pipeline;
pub mod processor;

// Re-export commonly used types
pub use config::{CleaningConfig, CompressionAlgorithm, ConfigOverrides, WriteOptions};
pub use error::{CleanError, ErrorClass, Result};
pub use formats::{read_table, write_table};
pub use models::{FileFormat, JobStats, TableSummary};
pub use pipeline::{DataCleaner, StageReport, clean};
pub use processor::{JobRequest, inspect, run, run_job};
