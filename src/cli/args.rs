//! Command-line argument definitions
//!
//! Uses the clap derive API. Parameter precedence for a cleaning job is:
//! built-in defaults, then the `--config` JSON file, then individual flags.

use crate::config::{CleaningConfig, CompressionAlgorithm, ConfigOverrides, WriteOptions};
use crate::error::Result;
use crate::models::FileFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Clean production-machine shift telemetry
#[derive(Debug, Clone, Parser)]
#[command(
    name = "shiftclean",
    version,
    about = "Clean production-machine shift telemetry and derive machine efficiency",
    long_about = "Reads a shift telemetry export (CSV, Excel or Parquet), normalizes its headers, \
                  drops unparseable rows, RPM outliers and shifts that ran more than one style, \
                  derives per-spindle runtime and machine efficiency, filters on efficiency and \
                  writes the cleaned table."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    /// Only show warnings and errors; hides the progress spinner
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress output except warnings and errors"
    )]
    pub quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Clean a telemetry table and write the result
    Clean(CleanArgs),
    /// Show the shape, columns and leading rows of a table
    Inspect(InspectArgs),
}

/// Arguments for the clean command
#[derive(Debug, Clone, Parser)]
pub struct CleanArgs {
    /// Raw telemetry export to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Destination for the cleaned table
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Input format, overriding the file extension (csv, xlsx, xls, parquet)
    #[arg(long = "input-format", value_name = "FORMAT")]
    pub input_format: Option<FileFormat>,

    /// Output format, overriding the file extension (csv, xlsx, parquet)
    #[arg(long = "output-format", value_name = "FORMAT")]
    pub output_format: Option<FileFormat>,

    /// Drop rows with RPM above this value
    #[arg(long = "rpm-max", value_name = "RPM")]
    pub rpm_max: Option<f64>,

    /// Lower machine efficiency bound in percent (inclusive)
    #[arg(long = "eff-min", value_name = "PERCENT", allow_negative_numbers = true)]
    pub efficiency_min: Option<f64>,

    /// Upper machine efficiency bound in percent (inclusive)
    #[arg(long = "eff-max", value_name = "PERCENT", allow_negative_numbers = true)]
    pub efficiency_max: Option<f64>,

    /// Spindles per machine side
    #[arg(long = "spindles", value_name = "COUNT")]
    pub spindles: Option<u32>,

    /// Scheduled shift length in hours
    #[arg(long = "shift-hours", value_name = "HOURS")]
    pub shift_hours: Option<f64>,

    /// Keep shifts that ran more than one style instead of dropping them
    #[arg(long = "keep-multi-style-shifts")]
    pub keep_multi_style_shifts: bool,

    /// JSON file with parameter overrides
    ///
    /// Accepts the keys rpm_max, efficiency_min, efficiency_max,
    /// spindles_per_side, shift_hours, drop_multi_style_shifts, columns and
    /// rename_map. Individual flags take precedence over the file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Prepend a 0-based index column to the output
    #[arg(long = "include-index")]
    pub include_index: bool,

    /// Parquet compression (snappy, zstd, lz4, none)
    #[arg(long = "compression", value_name = "CODEC", default_value = "snappy")]
    pub compression: CompressionAlgorithm,

    /// Print the job statistics as JSON on stdout
    #[arg(long = "json")]
    pub json: bool,
}

impl CleanArgs {
    /// Build the cleaning configuration from the config file and flags
    pub fn cleaning_config(&self) -> Result<CleaningConfig> {
        let overrides = match &self.config_file {
            Some(path) => ConfigOverrides::from_file(path)?,
            None => ConfigOverrides::default(),
        };

        let mut builder = overrides.apply(CleaningConfig::builder());
        if let Some(v) = self.rpm_max {
            builder = builder.with_rpm_max(v);
        }
        if let Some(v) = self.efficiency_min {
            builder = builder.with_efficiency_min(v);
        }
        if let Some(v) = self.efficiency_max {
            builder = builder.with_efficiency_max(v);
        }
        if let Some(v) = self.spindles {
            builder = builder.with_spindles_per_side(v);
        }
        if let Some(v) = self.shift_hours {
            builder = builder.with_shift_hours(v);
        }
        if self.keep_multi_style_shifts {
            builder = builder.with_drop_multi_style_shifts(false);
        }
        builder.build()
    }

    pub fn write_options(&self) -> WriteOptions {
        let options = WriteOptions::default().with_compression(self.compression);
        if self.include_index {
            options.with_row_index()
        } else {
            options
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Table to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Format, overriding the file extension
    #[arg(long = "format", value_name = "FORMAT")]
    pub format: Option<FileFormat>,

    /// Number of leading rows to show (at most 500)
    #[arg(short = 'n', long = "rows", value_name = "N", default_value_t = 10)]
    pub rows: usize,

    /// Print the summary as JSON on stdout
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Log level implied by `--verbose` and `--quiet`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// True when the progress spinner should be drawn
    pub fn show_progress(&self) -> bool {
        let json = match &self.command {
            Commands::Clean(args) => args.json,
            Commands::Inspect(args) => args.json,
        };
        !self.quiet && !json
    }
}
