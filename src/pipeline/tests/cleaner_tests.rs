//! End-to-end tests for the ordered cleaning pipeline

use super::*;
use crate::constants::derived::{self, MACHINE_EFFICIENCY, RUNTIME_SECONDS};
use crate::error::CleanError;
use crate::pipeline::{DataCleaner, clean};

#[test]
fn test_valid_export_keeps_every_row() {
    let cleaned = clean(&raw_export(), &permissive_config()).unwrap();

    assert_eq!(cleaned.height(), 3);
    let efficiency = f64_values(&cleaned, MACHINE_EFFICIENCY);
    let expected = 27_000.0 / (8.0 * 3600.0 * 84.0) * 100.0;
    assert!((efficiency[0].unwrap() - expected).abs() < 1e-9);
    assert_eq!(
        f64_values(&cleaned, RUNTIME_SECONDS),
        vec![Some(27_000.0), Some(21_600.0), Some(18_000.0)]
    );
}

#[test]
fn test_output_column_order() {
    let cleaned = clean(&raw_export(), &permissive_config()).unwrap();

    let mut expected = vec![
        "Date",
        "Shift_period",
        "Machine-number",
        "Style-description",
        "Run_time",
        "RPM",
    ];
    expected.extend_from_slice(derived::ALL);
    assert_eq!(column_names(&cleaned), expected);
}

#[test]
fn test_default_efficiency_bounds_drop_low_utilisation() {
    let cleaned = clean(&raw_export(), &CleaningConfig::default()).unwrap();
    assert_eq!(cleaned.height(), 0);
    assert_eq!(column_names(&cleaned).len(), 10);
}

#[test]
fn test_multi_style_shift_dropped_or_kept_by_flag() {
    let raw = canonical_frame(
        &["2024-01-15", "2024-01-15", "2024-01-16"],
        &["A", "A", "A"],
        &["M1", "M1", "M1"],
        &[Some("S1"), Some("S2"), Some("S1")],
        &["07:30:00", "06:00:00", "05:00:00"],
        &["5500", "6000", "4500"],
    );

    let dropped = clean(&raw, &permissive_config()).unwrap();
    assert_eq!(dropped.height(), 1);

    let keep_config = CleaningConfig::builder()
        .with_efficiency_range(0.0, 100.0)
        .with_drop_multi_style_shifts(false)
        .build()
        .unwrap();
    let kept = clean(&raw, &keep_config).unwrap();
    assert_eq!(kept.height(), 3);
}

#[test]
fn test_rpm_outlier_removed() {
    let raw = canonical_frame(
        &["2024-01-15", "2024-01-16"],
        &["A", "A"],
        &["M1", "M1"],
        &[Some("S1"), Some("S1")],
        &["07:30:00", "07:30:00"],
        &["15000", "5500"],
    );

    let (cleaned, report) = DataCleaner::new(permissive_config())
        .clean_with_report(&raw)
        .unwrap();
    assert_eq!(f64_values(&cleaned, "RPM"), vec![Some(5500.0)]);
    assert_eq!(report.rpm_outliers, 1);
}

#[test]
fn test_efficiency_bounds_are_inclusive_end_to_end() {
    // 1 spindle, 1 hour shift: seconds / 36 is the efficiency percentage
    let config = CleaningConfig::builder()
        .with_spindles_per_side(1)
        .with_shift_hours(1.0)
        .build()
        .unwrap();
    let raw = canonical_frame(
        &["2024-01-15", "2024-01-16", "2024-01-17", "2024-01-18"],
        &["A", "A", "A", "A"],
        &["M1", "M1", "M1", "M1"],
        &[Some("S1"), Some("S1"), Some("S1"), Some("S1")],
        &["00:45:00", "01:00:00", "00:44:59", "01:00:01"],
        &["100", "100", "100", "100"],
    );

    let cleaned = clean(&raw, &config).unwrap();
    let efficiency = f64_values(&cleaned, MACHINE_EFFICIENCY);
    assert_eq!(efficiency, vec![Some(75.0), Some(100.0)]);
}

#[test]
fn test_report_accounts_for_every_removed_row() {
    let raw = canonical_frame(
        &["2024-01-15", "2024-01-15", "2024-01-15", "bad", "2024-01-16", "2024-01-17"],
        &["A", "A", "B", "A", "A", "A"],
        &["M1", "M1", "M1", "M1", "M2", "M3"],
        &[Some("S1"), Some("S2"), Some("S1"), Some("S1"), Some("S1"), Some("S1")],
        &["01:00:00", "01:00:00", "01:00:00", "01:00:00", "01:00:00", "01:00:00"],
        &["100", "100", "100", "100", "20000", "100"],
    );
    let config = CleaningConfig::builder()
        .with_efficiency_range(0.1, 100.0)
        .build()
        .unwrap();

    let (cleaned, report) = DataCleaner::new(config).clean_with_report(&raw).unwrap();
    assert_eq!(report.input_rows, 6);
    assert_eq!(report.invalid_rows, 1);
    assert_eq!(report.rpm_outliers, 1);
    assert_eq!(report.multi_style_rows, 2);
    // 3600 / (8 * 3600 * 84) * 100 is about 0.149
    assert_eq!(report.efficiency_outliers, 0);
    assert_eq!(report.output_rows, cleaned.height());
    assert_eq!(report.total_removed(), 4);
}

#[test]
fn test_missing_required_column_fails() {
    let raw = raw_export().drop("RPM").unwrap();

    let err = clean(&raw, &CleaningConfig::default()).unwrap_err();
    assert!(matches!(err, CleanError::MissingColumns { ref columns } if columns == &vec!["RPM".to_string()]));
}

#[test]
fn test_input_frame_is_not_modified() {
    let raw = raw_export();
    let snapshot = raw.clone();

    clean(&raw, &permissive_config()).unwrap();
    assert!(raw.equals_missing(&snapshot));
    assert_eq!(column_names(&raw), column_names(&snapshot));
}

#[test]
fn test_cleaning_is_idempotent() {
    let config = permissive_config();
    let once = clean(&raw_export(), &config).unwrap();
    let twice = clean(&once, &config).unwrap();

    assert_eq!(column_names(&once), column_names(&twice));
    assert!(once.equals_missing(&twice));
}

#[test]
fn test_extra_columns_pass_through() {
    let mut raw = raw_export();
    raw.with_column(Column::new("Operator".into(), &["ann", "bob", "cy"]))
        .unwrap();

    let cleaned = clean(&raw, &permissive_config()).unwrap();
    assert_eq!(
        str_values(&cleaned, "Operator"),
        vec![
            Some("ann".to_string()),
            Some("bob".to_string()),
            Some("cy".to_string())
        ]
    );
}

#[test]
fn test_empty_table_with_headers() {
    let raw = canonical_frame(&[], &[], &[], &[], &[], &[]);

    let cleaned = clean(&raw, &permissive_config()).unwrap();
    assert_eq!(cleaned.height(), 0);
    assert_eq!(column_names(&cleaned).len(), 10);
}

fn day_night_runs() -> DataFrame {
    df!(
        "Date" => ["2024-01-15", "2024-01-15", "2024-01-16"],
        "Shift_period" => ["Day", "Night", "Day"],
        "Machine-number" => ["M001", "M001", "M002"],
        "Style-description" => ["A", "A", "B"],
        "Run_time" => ["07:30:00", "06:45:00", "08:00:00"],
        "RPM" => [5500i64, 6000, 5800],
    )
    .unwrap()
}

#[test]
fn test_day_night_runs_keep_all_rows() {
    let cleaned = clean(&day_night_runs(), &permissive_config()).unwrap();

    assert_eq!(cleaned.height(), 3);
    let efficiency = f64_values(&cleaned, MACHINE_EFFICIENCY);
    assert!((efficiency[0].unwrap() - 1.116_071_428_571).abs() < 1e-9);
    assert!((efficiency[2].unwrap() - 1.190_476_190_476).abs() < 1e-9);
}

#[test]
fn test_added_style_splits_a_shift() {
    let extra = df!(
        "Date" => ["2024-01-15"],
        "Shift_period" => ["Day"],
        "Machine-number" => ["M001"],
        "Style-description" => ["C"],
        "Run_time" => ["01:00:00"],
        "RPM" => [5000i64],
    )
    .unwrap();
    let raw = day_night_runs().vstack(&extra).unwrap();

    let dropped = clean(&raw, &permissive_config()).unwrap();
    assert_eq!(
        str_values(&dropped, "Shift_period"),
        vec![Some("Night".to_string()), Some("Day".to_string())]
    );

    let keep = CleaningConfig::builder()
        .with_efficiency_range(0.0, 100.0)
        .with_drop_multi_style_shifts(false)
        .build()
        .unwrap();
    assert_eq!(clean(&raw, &keep).unwrap().height(), 4);
}
