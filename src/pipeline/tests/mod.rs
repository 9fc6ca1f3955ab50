//! Tests for the cleaning pipeline stages and their orchestration

pub mod cleaner_tests;
pub mod multi_style_tests;

use crate::config::CleaningConfig;
use polars::prelude::*;

/// Raw export with the line-broken headers of the shop-floor system
///
/// Three valid single-style shifts.
pub fn raw_export() -> DataFrame {
    df!(
        "Date" => ["2024-01-15", "2024-01-15", "2024-01-16"],
        "Shift\nperiod" => ["A", "B", "A"],
        "Machine-number" => ["M1", "M1", "M2"],
        "Style-description" => ["S1", "S1", "S2"],
        "Run\ntime" => ["07:30:00", "06:00:00", "05:00:00"],
        "RPM" => ["5500", "6000", "4500"],
    )
    .unwrap()
}

/// Frame already carrying canonical headers
pub fn canonical_frame(
    dates: &[&str],
    shifts: &[&str],
    machines: &[&str],
    styles: &[Option<&str>],
    runtimes: &[&str],
    rpms: &[&str],
) -> DataFrame {
    df!(
        "Date" => dates,
        "Shift_period" => shifts,
        "Machine-number" => machines,
        "Style-description" => styles,
        "Run_time" => runtimes,
        "RPM" => rpms,
    )
    .unwrap()
}

/// Efficiency bounds wide enough to keep every plausible row
pub fn permissive_config() -> CleaningConfig {
    CleaningConfig::builder()
        .with_efficiency_range(0.0, 100.0)
        .build()
        .unwrap()
}

pub fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name).unwrap().f64().unwrap().into_iter().collect()
}

pub fn str_values(df: &DataFrame, name: &str) -> Vec<Option<String>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::String)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}
