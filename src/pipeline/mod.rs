//! Cleaning pipeline for shift telemetry tables
//!
//! Turns a raw export into an analysis-ready table. The stages run in a
//! fixed order:
//!
//! 1. **Header normalization**: raw export headers (which may contain
//!    embedded line breaks) are renamed to canonical names
//! 2. **Required columns**: date, shift, machine, style, runtime and RPM
//!    must all be present
//! 3. **Coercion**: dates, RPM and runtime are parsed; failures become missing
//! 4. **Invalid rows**: rows missing a date, RPM or runtime are dropped
//! 5. **RPM filter**: readings above the configured maximum are dropped
//! 6. **Multi-style shifts**: shifts that ran several styles are dropped
//!    entirely (optional)
//! 7. **Derived metrics**: per-spindle runtime and machine efficiency
//! 8. **Efficiency filter**: rows outside the efficiency bounds are dropped
//!
//! Columns that are not part of the canonical set pass through untouched.
//!
//! # Example Usage
//!
//! ```rust
//! use polars::prelude::*;
//! use shiftclean::config::CleaningConfig;
//! use shiftclean::pipeline::DataCleaner;
//!
//! # fn example() -> shiftclean::error::Result<()> {
//! let raw = df!(
//!     "Date" => ["2024-01-15"],
//!     "Shift\nperiod" => ["A"],
//!     "Machine-number" => ["M1"],
//!     "Style-description" => ["S1"],
//!     "Run\ntime" => ["7:30:00"],
//!     "RPM" => ["5500"],
//! )?;
//!
//! let config = CleaningConfig::builder()
//!     .with_efficiency_range(0.0, 100.0)
//!     .build()?;
//! let (cleaned, report) = DataCleaner::new(config).clean_with_report(&raw)?;
//!
//! assert_eq!(cleaned.height(), 1);
//! assert_eq!(report.total_removed(), 0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cleaner;
pub mod coercion;
pub mod filters;
pub mod headers;
pub mod metrics;
pub mod multi_style;
pub mod parsers;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use cleaner::DataCleaner;
pub use multi_style::{ShiftKey, multi_style_groups};
pub use report::StageReport;

use crate::config::CleaningConfig;
use crate::error::Result;
use polars::prelude::DataFrame;

/// Clean `raw` with `config`
pub fn clean(raw: &DataFrame, config: &CleaningConfig) -> Result<DataFrame> {
    DataCleaner::new(config.clone()).clean(raw)
}
