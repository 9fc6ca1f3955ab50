//! Row filters applied after coercion and after metric derivation

use crate::config::CleaningConfig;
use crate::constants::derived::{MACHINE_EFFICIENCY, RUNTIME_SECONDS};
use crate::error::Result;
use polars::prelude::*;

/// Remove rows whose date, RPM or runtime could not be coerced
pub fn drop_invalid_rows(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let columns = config.columns();
    let valid = col(columns.date.as_str())
        .is_not_null()
        .and(col(columns.rpm.as_str()).is_not_null())
        .and(col(RUNTIME_SECONDS).is_not_null());

    Ok(df.lazy().filter(valid).collect()?)
}

/// Keep rows whose RPM is at most `rpm_max`
pub fn filter_rpm(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let rpm = config.columns().rpm.as_str();
    Ok(df
        .lazy()
        .filter(col(rpm).lt_eq(lit(config.rpm_max())))
        .collect()?)
}

/// Keep rows whose efficiency lies within the configured bounds, inclusive
pub fn filter_efficiency(df: DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    let within = col(MACHINE_EFFICIENCY)
        .gt_eq(lit(config.efficiency_min()))
        .and(col(MACHINE_EFFICIENCY).lt_eq(lit(config.efficiency_max())));

    Ok(df.lazy().filter(within).collect()?)
}
