//! Command implementations for the shiftclean CLI
//!
//! Sets up logging, runs the requested command behind an optional spinner
//! and reports the result either as colored text or as JSON.

use crate::cli::args::{Args, CleanArgs, Commands, InspectArgs};
use crate::error::Result as CleanResult;
use crate::models::{JobStats, TableSummary};
use crate::pipeline::StageReport;
use crate::processor::{JobRequest, inspect, run_job_with_report};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use polars::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// JSON document printed by `clean --json`
#[derive(Debug, Serialize)]
struct CleanReport<'a> {
    #[serde(flatten)]
    stats: JobStats,
    stages: StageReport,
    output: &'a str,
}

/// JSON document printed by `inspect --json`
#[derive(Debug, Serialize)]
struct InspectReport {
    format: String,
    row_count: usize,
    columns: Vec<String>,
    preview: Vec<Vec<Option<String>>>,
}

/// Run the parsed command line
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let progress = args.show_progress();
    match &args.command {
        Commands::Clean(clean_args) => run_clean(clean_args, progress),
        Commands::Inspect(inspect_args) => run_inspect(inspect_args, progress),
    }
}

fn run_clean(args: &CleanArgs, progress: bool) -> Result<()> {
    let start = Instant::now();
    let config = args.cleaning_config()?;
    let options = args.write_options();
    let request = JobRequest::new(&args.input, &args.output)
        .with_input_format(args.input_format)
        .with_output_format(args.output_format);

    let outcome = with_spinner(
        progress,
        format!("Cleaning {}", args.input.display()),
        || run_job_with_report(&request, &config, &options),
    )
    .with_context(|| format!("cleaning {} failed", args.input.display()))?;

    if args.json {
        let output = args.output.display().to_string();
        let report = CleanReport {
            stats: outcome.stats,
            stages: outcome.report,
            output: &output,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_clean_summary(args, &outcome.stats, &outcome.report, start.elapsed());
    Ok(())
}

fn run_inspect(args: &InspectArgs, progress: bool) -> Result<()> {
    let summary = with_spinner(
        progress,
        format!("Reading {}", args.input.display()),
        || inspect(&args.input, args.format, args.rows),
    )
    .with_context(|| format!("inspecting {} failed", args.input.display()))?;

    if args.json {
        let report = InspectReport {
            format: summary.format.to_string(),
            row_count: summary.row_count,
            columns: summary.columns.clone(),
            preview: preview_rows(&summary.preview)?,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_inspect_summary(args, &summary);
    Ok(())
}

/// Run `job` while drawing a spinner on stderr when `enabled`
fn with_spinner<T>(
    enabled: bool,
    message: String,
    job: impl FnOnce() -> CleanResult<T>,
) -> CleanResult<T> {
    let spinner = enabled.then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let result = job();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result
}

/// Render every preview cell as text; missing cells stay `None`
fn preview_rows(df: &DataFrame) -> Result<Vec<Vec<Option<String>>>> {
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        let text = column.cast(&DataType::String)?;
        for (row, value) in rows.iter_mut().zip(text.str()?.into_iter()) {
            row.push(value.map(str::to_string));
        }
    }
    Ok(rows)
}

fn print_clean_summary(
    args: &CleanArgs,
    stats: &JobStats,
    report: &StageReport,
    elapsed: Duration,
) {
    println!("{}", "Cleaning complete".green().bold());
    println!("  {:<22} {}", "Input rows:", stats.input_rows);
    println!("  {:<22} {}", "Output rows:", stats.output_rows.to_string().green());

    let removed = format!("{} ({:.1}%)", stats.rows_removed, stats.removal_rate());
    if stats.rows_removed > 0 {
        println!("  {:<22} {}", "Rows removed:", removed.yellow());
        for (label, count) in [
            ("unparseable", report.invalid_rows),
            ("rpm outliers", report.rpm_outliers),
            ("multi-style shifts", report.multi_style_rows),
            ("efficiency outliers", report.efficiency_outliers),
        ] {
            if count > 0 {
                println!("    {:<20} {}", label, count);
            }
        }
    } else {
        println!("  {:<22} {}", "Rows removed:", removed);
    }

    println!("  {:<22} {}", "Output:", args.output.display().to_string().cyan());
    println!("  {:<22} {}", "Elapsed:", HumanDuration(elapsed));
}

fn print_inspect_summary(args: &InspectArgs, summary: &TableSummary) {
    println!(
        "{} {}",
        args.input.display().to_string().bold(),
        format!("({})", summary.format).dimmed()
    );
    println!("  {:<10} {}", "Rows:", summary.row_count);
    println!("  {:<10} {}", "Columns:", summary.columns.len());
    for name in &summary.columns {
        println!("    {}", name.escape_debug());
    }
    println!();
    println!("{}", summary.preview);
}

/// Set up structured logging based on CLI arguments
///
/// `RUST_LOG` wins over the verbosity flags when set.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shiftclean={}", log_level)));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}
