//! Configuration management and validation.
//!
//! Provides the immutable [`CleaningConfig`] consumed by the pipeline, the
//! builder used to override its defaults, the JSON-friendly
//! [`ConfigOverrides`] submitted by calling services, and the
//! [`WriteOptions`] that control output files.

use crate::constants::{
    DEFAULT_EFFICIENCY_MAX, DEFAULT_EFFICIENCY_MIN, DEFAULT_RENAME_MAP, DEFAULT_RPM_MAX,
    DEFAULT_SHIFT_HOURS, DEFAULT_SPINDLES_PER_SIDE, columns,
};
use crate::error::{CleanError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

/// Bindings from logical fields to column names (post-rename)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub date: String,
    pub shift: String,
    pub machine: String,
    pub style: String,
    pub runtime: String,
    pub rpm: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: columns::DATE.to_string(),
            shift: columns::SHIFT.to_string(),
            machine: columns::MACHINE.to_string(),
            style: columns::STYLE.to_string(),
            runtime: columns::RUNTIME.to_string(),
            rpm: columns::RPM.to_string(),
        }
    }
}

impl ColumnNames {
    /// The six columns every input must provide, in binding order
    pub fn required(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.shift.as_str(),
            self.machine.as_str(),
            self.style.as_str(),
            self.runtime.as_str(),
            self.rpm.as_str(),
        ]
    }
}

/// Normalize header text for rename lookups: line breaks become `\n`
/// and surrounding whitespace is dropped.
pub fn normalize_header(header: &str) -> String {
    header.replace("\r\n", "\n").replace('\r', "\n").trim().to_string()
}

/// Immutable parameters for one cleaning job
///
/// Construct with [`CleaningConfig::default`] or through
/// [`CleaningConfig::builder`]; there are no setters afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CleaningConfig {
    rpm_max: f64,
    efficiency_min: f64,
    efficiency_max: f64,
    spindles_per_side: u32,
    shift_hours: f64,
    drop_multi_style_shifts: bool,
    columns: ColumnNames,
    rename_map: HashMap<String, String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            rpm_max: DEFAULT_RPM_MAX,
            efficiency_min: DEFAULT_EFFICIENCY_MIN,
            efficiency_max: DEFAULT_EFFICIENCY_MAX,
            spindles_per_side: DEFAULT_SPINDLES_PER_SIDE,
            shift_hours: DEFAULT_SHIFT_HOURS,
            drop_multi_style_shifts: true,
            columns: ColumnNames::default(),
            rename_map: default_rename_map(),
        }
    }
}

fn default_rename_map() -> HashMap<String, String> {
    DEFAULT_RENAME_MAP
        .iter()
        .map(|(raw, canonical)| (normalize_header(raw), canonical.to_string()))
        .collect()
}

impl CleaningConfig {
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    pub fn rpm_max(&self) -> f64 {
        self.rpm_max
    }

    pub fn efficiency_min(&self) -> f64 {
        self.efficiency_min
    }

    pub fn efficiency_max(&self) -> f64 {
        self.efficiency_max
    }

    pub fn spindles_per_side(&self) -> u32 {
        self.spindles_per_side
    }

    pub fn shift_hours(&self) -> f64 {
        self.shift_hours
    }

    pub fn drop_multi_style_shifts(&self) -> bool {
        self.drop_multi_style_shifts
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Rename map keyed by normalized raw header text
    pub fn rename_map(&self) -> &HashMap<String, String> {
        &self.rename_map
    }

    /// Theoretical spindle-seconds available in one shift
    pub fn shift_capacity_seconds(&self) -> f64 {
        self.shift_hours * crate::constants::SECONDS_PER_HOUR * f64::from(self.spindles_per_side)
    }
}

/// Builder for [`CleaningConfig`]; starts from the documented defaults
#[derive(Debug, Clone)]
pub struct CleaningConfigBuilder {
    inner: CleaningConfig,
}

impl Default for CleaningConfigBuilder {
    fn default() -> Self {
        Self {
            inner: CleaningConfig::default(),
        }
    }
}

impl CleaningConfigBuilder {
    pub fn with_rpm_max(mut self, rpm_max: f64) -> Self {
        self.inner.rpm_max = rpm_max;
        self
    }

    pub fn with_efficiency_min(mut self, efficiency_min: f64) -> Self {
        self.inner.efficiency_min = efficiency_min;
        self
    }

    pub fn with_efficiency_max(mut self, efficiency_max: f64) -> Self {
        self.inner.efficiency_max = efficiency_max;
        self
    }

    /// Set both efficiency bounds at once
    pub fn with_efficiency_range(self, min: f64, max: f64) -> Self {
        self.with_efficiency_min(min).with_efficiency_max(max)
    }

    pub fn with_spindles_per_side(mut self, spindles: u32) -> Self {
        self.inner.spindles_per_side = spindles;
        self
    }

    pub fn with_shift_hours(mut self, hours: f64) -> Self {
        self.inner.shift_hours = hours;
        self
    }

    pub fn with_drop_multi_style_shifts(mut self, drop: bool) -> Self {
        self.inner.drop_multi_style_shifts = drop;
        self
    }

    pub fn with_columns(mut self, columns: ColumnNames) -> Self {
        self.inner.columns = columns;
        self
    }

    /// Replace the rename map; keys are normalized on insertion
    pub fn with_rename_map<I, K, V>(mut self, map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.inner.rename_map = map
            .into_iter()
            .map(|(raw, canonical)| (normalize_header(raw.as_ref()), canonical.into()))
            .collect();
        self
    }

    /// Validate and produce the immutable configuration
    pub fn build(self) -> Result<CleaningConfig> {
        let config = self.inner;

        if config.rpm_max.is_nan() {
            return Err(CleanError::configuration("rpm_max must be a number"));
        }
        if !config.efficiency_min.is_finite() || !config.efficiency_max.is_finite() {
            return Err(CleanError::configuration(
                "efficiency bounds must be finite numbers",
            ));
        }
        if config.efficiency_min > config.efficiency_max {
            return Err(CleanError::configuration(format!(
                "efficiency_min ({}) must not exceed efficiency_max ({})",
                config.efficiency_min, config.efficiency_max
            )));
        }
        if config.spindles_per_side == 0 {
            return Err(CleanError::configuration(
                "spindles_per_side must be greater than zero",
            ));
        }
        if !(config.shift_hours.is_finite() && config.shift_hours > 0.0) {
            return Err(CleanError::configuration(format!(
                "shift_hours must be a positive number, got {}",
                config.shift_hours
            )));
        }

        let required = config.columns.required();
        if required.iter().any(|name| name.trim().is_empty()) {
            return Err(CleanError::configuration("column names must not be empty"));
        }
        let distinct: HashSet<&str> = required.iter().copied().collect();
        if distinct.len() != required.len() {
            return Err(CleanError::configuration(format!(
                "column names must be distinct, got {required:?}"
            )));
        }

        debug!(
            "Cleaning config: rpm_max={} efficiency={}..={} spindles={} shift_hours={} drop_multi_style={}",
            config.rpm_max,
            config.efficiency_min,
            config.efficiency_max,
            config.spindles_per_side,
            config.shift_hours,
            config.drop_multi_style_shifts
        );

        Ok(config)
    }
}

/// Optional parameter overrides, as submitted in JSON by a calling service
/// or loaded from a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub rpm_max: Option<f64>,
    pub efficiency_min: Option<f64>,
    pub efficiency_max: Option<f64>,
    pub spindles_per_side: Option<u32>,
    pub shift_hours: Option<f64>,
    pub drop_multi_style_shifts: Option<bool>,
    pub columns: Option<ColumnNames>,
    pub rename_map: Option<HashMap<String, String>>,
}

impl ConfigOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| CleanError::configuration(format!("invalid configuration JSON: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            CleanError::configuration(format!("invalid configuration file {}: {e}", path.display()))
        })
    }

    /// Layer the present fields on top of a builder
    pub fn apply(&self, mut builder: CleaningConfigBuilder) -> CleaningConfigBuilder {
        if let Some(v) = self.rpm_max {
            builder = builder.with_rpm_max(v);
        }
        if let Some(v) = self.efficiency_min {
            builder = builder.with_efficiency_min(v);
        }
        if let Some(v) = self.efficiency_max {
            builder = builder.with_efficiency_max(v);
        }
        if let Some(v) = self.spindles_per_side {
            builder = builder.with_spindles_per_side(v);
        }
        if let Some(v) = self.shift_hours {
            builder = builder.with_shift_hours(v);
        }
        if let Some(v) = self.drop_multi_style_shifts {
            builder = builder.with_drop_multi_style_shifts(v);
        }
        if let Some(columns) = &self.columns {
            builder = builder.with_columns(columns.clone());
        }
        if let Some(map) = &self.rename_map {
            builder = builder.with_rename_map(map.iter().map(|(k, v)| (k.as_str(), v.clone())));
        }
        builder
    }

    pub fn into_config(self) -> Result<CleaningConfig> {
        self.apply(CleaningConfig::builder()).build()
    }
}

/// Supported compression algorithms for parquet output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

impl std::str::FromStr for CompressionAlgorithm {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snappy" => Ok(Self::Snappy),
            "zstd" => Ok(Self::Zstd),
            "lz4" => Ok(Self::Lz4),
            "none" | "uncompressed" => Ok(Self::Uncompressed),
            other => Err(CleanError::configuration(format!(
                "unknown compression '{other}' (expected snappy, zstd, lz4 or none)"
            ))),
        }
    }
}

/// Options controlling how a table is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Prepend a 0-based positional `index` column
    pub include_row_index: bool,
    /// Compression for parquet output; ignored by other formats
    pub compression: CompressionAlgorithm,
}

impl WriteOptions {
    pub fn with_row_index(mut self) -> Self {
        self.include_row_index = true;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }
}
