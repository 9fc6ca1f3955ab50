//! Type coercion for the date, RPM and runtime columns
//!
//! Unparseable cells become missing; row removal happens later in
//! [`super::filters::drop_invalid_rows`].

use super::parsers::{parse_date, parse_duration_seconds, parse_number};
use crate::config::CleaningConfig;
use crate::constants::derived::RUNTIME_SECONDS;
use crate::error::Result;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use tracing::debug;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Coerce the canonical columns in place and append `Run_time_seconds`
///
/// The raw runtime column is left as it was read.
pub fn coerce_types(mut df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let columns = config.columns();

    let date = coerce_date_column(df.column(&columns.date)?)?;
    log_missing(&columns.date, &date);
    df.with_column(date)?;

    let rpm = coerce_numeric_column(df.column(&columns.rpm)?)?;
    log_missing(&columns.rpm, &rpm);
    df.with_column(rpm)?;

    let seconds = runtime_seconds_column(df.column(&columns.runtime)?)?;
    log_missing(RUNTIME_SECONDS, &seconds);
    df.with_column(seconds)?;

    Ok(df)
}

/// Convert a column to `Date`, keeping only the calendar date of date-times
pub fn coerce_date_column(column: &Column) -> Result<Column> {
    match column.dtype() {
        DataType::Date => Ok(column.clone()),
        DataType::Datetime(_, _) => Ok(column.cast(&DataType::Date)?),
        DataType::String => dates_from_text(column),
        _ => dates_from_text(&column.cast(&DataType::String)?),
    }
}

fn dates_from_text(column: &Column) -> Result<Column> {
    let days: Vec<Option<i32>> = column
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_date).map(days_since_epoch))
        .collect();
    Ok(Column::new(column.name().clone(), days).cast(&DataType::Date)?)
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert a column to `Float64`; text that is not a finite number becomes missing
pub fn coerce_numeric_column(column: &Column) -> Result<Column> {
    let values: Vec<Option<f64>> = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_number))
            .collect(),
        _ => column
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect(),
    };
    Ok(Column::new(column.name().clone(), values))
}

/// Build the `Run_time_seconds` column from a runtime column of any type
///
/// Durations convert directly, clock times count seconds since midnight
/// and everything else is parsed as duration text.
pub fn runtime_seconds_column(column: &Column) -> Result<Column> {
    let seconds: Vec<Option<f64>> = match column.dtype() {
        DataType::Duration(unit) => {
            let per_second = ticks_per_second(*unit);
            column
                .cast(&DataType::Int64)?
                .i64()?
                .into_iter()
                .map(|ticks| ticks.map(|t| t as f64 / per_second))
                .collect()
        }
        DataType::Time => column
            .cast(&DataType::Int64)?
            .i64()?
            .into_iter()
            .map(|nanos| nanos.map(|n| n as f64 / 1e9))
            .collect(),
        DataType::String => seconds_from_text(column)?,
        _ => seconds_from_text(&column.cast(&DataType::String)?)?,
    };
    Ok(Column::new(RUNTIME_SECONDS.into(), seconds))
}

fn seconds_from_text(column: &Column) -> Result<Vec<Option<f64>>> {
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_duration_seconds))
        .collect())
}

fn ticks_per_second(unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Nanoseconds => 1e9,
        TimeUnit::Microseconds => 1e6,
        TimeUnit::Milliseconds => 1e3,
    }
}

fn log_missing(name: &str, column: &Column) {
    let missing = column.null_count();
    if missing > 0 {
        debug!("{} of {} values in {:?} are missing after coercion", missing, column.len(), name);
    }
}
