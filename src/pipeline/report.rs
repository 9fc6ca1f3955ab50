//! Per-stage row accounting for one cleaning run

use serde::{Deserialize, Serialize};

/// Rows removed by each filtering stage of the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub input_rows: usize,
    /// Rows with a missing date, RPM or runtime after coercion
    pub invalid_rows: usize,
    pub rpm_outliers: usize,
    /// Rows belonging to shifts that ran more than one style
    pub multi_style_rows: usize,
    pub efficiency_outliers: usize,
    pub output_rows: usize,
}

impl StageReport {
    pub fn new(input_rows: usize) -> Self {
        Self {
            input_rows,
            output_rows: input_rows,
            ..Self::default()
        }
    }

    pub fn total_removed(&self) -> usize {
        self.invalid_rows + self.rpm_outliers + self.multi_style_rows + self.efficiency_outliers
    }

    /// One-line breakdown suitable for logs
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} rows (invalid: {}, rpm: {}, multi-style: {}, efficiency: {})",
            self.input_rows,
            self.output_rows,
            self.invalid_rows,
            self.rpm_outliers,
            self.multi_style_rows,
            self.efficiency_outliers
        )
    }
}
