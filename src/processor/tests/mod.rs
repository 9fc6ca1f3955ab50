//! Tests for the job runner using real files in temporary directories

pub mod basic_processing;

use crate::config::CleaningConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CSV export with quoted, line-broken headers; four valid rows and one
/// RPM outlier
pub const RAW_EXPORT_CSV: &str = "Date,\"Shift\nperiod\",Machine-number,Style-description,\"Run\ntime\",RPM
2024-01-15,A,M1,S1,07:30:00,5500
2024-01-15,B,M1,S1,06:00:00,6000
2024-01-16,A,M2,S2,05:00:00,4500
2024-01-16,B,M2,S2,04:00:00,15000
2024-01-17,A,M3,S3,garbage,5000
";

pub fn write_export(dir: &Path) -> PathBuf {
    let path = dir.join("export.csv");
    fs::write(&path, RAW_EXPORT_CSV).unwrap();
    path
}

pub fn permissive_config() -> CleaningConfig {
    CleaningConfig::builder()
        .with_efficiency_range(0.0, 100.0)
        .build()
        .unwrap()
}
