//! Application constants for shift telemetry cleaning
//!
//! Default thresholds, canonical column names, derived column names and
//! the parsing vocabulary shared by the pipeline and the file readers.

// =============================================================================
// Default Thresholds
// =============================================================================

/// Upper RPM bound; readings above it are treated as sensor outliers
pub const DEFAULT_RPM_MAX: f64 = 10_000.0;

/// Lower machine efficiency bound (percent)
pub const DEFAULT_EFFICIENCY_MIN: f64 = 75.0;

/// Upper machine efficiency bound (percent)
pub const DEFAULT_EFFICIENCY_MAX: f64 = 100.0;

/// Spindles contributing to one machine side's runtime
pub const DEFAULT_SPINDLES_PER_SIDE: u32 = 84;

/// Scheduled length of one shift
pub const DEFAULT_SHIFT_HOURS: f64 = 8.0;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

// =============================================================================
// Column Names
// =============================================================================

/// Canonical (post-rename) column names
pub mod columns {
    pub const DATE: &str = "Date";
    pub const SHIFT: &str = "Shift_period";
    pub const MACHINE: &str = "Machine-number";
    pub const STYLE: &str = "Style-description";
    pub const RUNTIME: &str = "Run_time";
    pub const RPM: &str = "RPM";
}

/// Columns appended by the pipeline, in output order
pub mod derived {
    pub const RUNTIME_SECONDS: &str = "Run_time_seconds";
    pub const RUNTIME_PER_SPINDLE_SECONDS: &str = "Run_time_per_spindle_seconds";
    pub const RUNTIME_PER_SPINDLE_HOURS: &str = "Run_time_per_spindle_hours";
    pub const MACHINE_EFFICIENCY: &str = "Machine_Efficiency";

    pub const ALL: &[&str] = &[
        RUNTIME_SECONDS,
        RUNTIME_PER_SPINDLE_SECONDS,
        RUNTIME_PER_SPINDLE_HOURS,
        MACHINE_EFFICIENCY,
    ];
}

/// Raw header text exported by the shop-floor system, mapped to canonical names
pub const DEFAULT_RENAME_MAP: &[(&str, &str)] = &[
    ("Shift\nperiod", columns::SHIFT),
    ("Run\ntime", columns::RUNTIME),
];

/// Name of the positional column prepended when writing with a row index
pub const ROW_INDEX_COLUMN: &str = "index";

// =============================================================================
// Parsing
// =============================================================================

/// Date formats tried in order for text date cells
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Date-time formats tried in order; only the date part is kept
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Maximum rows returned by a table preview
pub const MAX_PREVIEW_ROWS: usize = 500;
