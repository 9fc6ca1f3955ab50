//! Pipeline orchestration

use super::coercion::coerce_types;
use super::filters::{drop_invalid_rows, filter_efficiency, filter_rpm};
use super::headers::{normalize_headers, validate_required_columns};
use super::metrics::add_derived_metrics;
use super::multi_style::drop_multi_style_shifts;
use super::report::StageReport;
use crate::config::CleaningConfig;
use crate::error::Result;
use polars::prelude::*;
use tracing::{debug, info};

/// Applies the cleaning stages in their fixed order
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleaningConfig,
}

impl DataCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean `raw` and return the resulting table
    ///
    /// The input frame is never modified.
    pub fn clean(&self, raw: &DataFrame) -> Result<DataFrame> {
        self.clean_with_report(raw).map(|(df, _)| df)
    }

    /// Clean `raw`, also reporting how many rows each stage removed
    ///
    /// Stages run as: header normalization, required-column check, type
    /// coercion, invalid-row removal, RPM filter, multi-style removal (when
    /// enabled), derived metrics, efficiency filter.
    ///
    /// # Errors
    ///
    /// `MissingColumns` when a canonical column is absent after renaming.
    pub fn clean_with_report(&self, raw: &DataFrame) -> Result<(DataFrame, StageReport)> {
        let config = &self.config;
        let mut report = StageReport::new(raw.height());
        debug!("Cleaning {} rows x {} columns", raw.height(), raw.width());

        let df = normalize_headers(raw.clone(), config)?;
        validate_required_columns(&df, config)?;
        let df = coerce_types(df, config)?;

        let (df, removed) = measure(df, |df| drop_invalid_rows(df, config))?;
        report.invalid_rows = removed;
        debug!("Dropped {} rows with missing date, RPM or runtime", removed);

        let (df, removed) = measure(df, |df| filter_rpm(df, config))?;
        report.rpm_outliers = removed;
        debug!("Dropped {} rows above {} RPM", removed, config.rpm_max());

        let df = if config.drop_multi_style_shifts() {
            let (df, removed) = measure(df, |df| drop_multi_style_shifts(df, config))?;
            report.multi_style_rows = removed;
            debug!("Dropped {} rows from multi-style shifts", removed);
            df
        } else {
            df
        };

        let df = add_derived_metrics(df, config)?;

        let (df, removed) = measure(df, |df| filter_efficiency(df, config))?;
        report.efficiency_outliers = removed;
        debug!(
            "Dropped {} rows outside {}..={} % efficiency",
            removed,
            config.efficiency_min(),
            config.efficiency_max()
        );

        report.output_rows = df.height();
        info!("Cleaning complete: {}", report.summary());
        Ok((df, report))
    }
}

/// Run one filtering stage and count the rows it removed
fn measure<F>(df: DataFrame, stage: F) -> Result<(DataFrame, usize)>
where
    F: FnOnce(DataFrame) -> Result<DataFrame>,
{
    let before = df.height();
    let after = stage(df)?;
    let removed = before.saturating_sub(after.height());
    Ok((after, removed))
}
