//! Derived runtime and efficiency columns

use crate::config::CleaningConfig;
use crate::constants::SECONDS_PER_HOUR;
use crate::constants::derived::{
    MACHINE_EFFICIENCY, RUNTIME_PER_SPINDLE_HOURS, RUNTIME_PER_SPINDLE_SECONDS, RUNTIME_SECONDS,
};
use crate::error::Result;
use polars::prelude::*;

/// Append per-spindle runtime and machine efficiency
///
/// Efficiency is runtime as a percentage of the side's capacity for one
/// shift: `seconds / (shift_hours * 3600 * spindles) * 100`.
pub fn add_derived_metrics(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let spindles = f64::from(config.spindles_per_side());
    let capacity = config.shift_capacity_seconds();

    Ok(df
        .lazy()
        .with_columns([
            (col(RUNTIME_SECONDS) / lit(spindles)).alias(RUNTIME_PER_SPINDLE_SECONDS),
            (col(RUNTIME_SECONDS) / lit(spindles) / lit(SECONDS_PER_HOUR))
                .alias(RUNTIME_PER_SPINDLE_HOURS),
            (col(RUNTIME_SECONDS) / lit(capacity) * lit(100.0)).alias(MACHINE_EFFICIENCY),
        ])
        .collect()?)
}
