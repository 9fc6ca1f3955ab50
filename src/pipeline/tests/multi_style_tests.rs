//! Tests for multi-style shift removal

use super::*;
use crate::pipeline::multi_style::{drop_multi_style_shifts, multi_style_groups};

fn mixed_shift_frame() -> DataFrame {
    canonical_frame(
        &["2024-01-15", "2024-01-15", "2024-01-15", "2024-01-16"],
        &["A", "A", "B", "A"],
        &["M1", "M1", "M1", "M1"],
        &[Some("S1"), Some("S2"), Some("S1"), Some("S1")],
        &["01:00:00", "02:00:00", "03:00:00", "04:00:00"],
        &["100", "200", "300", "400"],
    )
}

#[test]
fn test_whole_mixed_group_is_removed() {
    let out = drop_multi_style_shifts(mixed_shift_frame(), &CleaningConfig::default()).unwrap();

    assert_eq!(out.height(), 2);
    assert_eq!(
        str_values(&out, "RPM"),
        vec![Some("300".to_string()), Some("400".to_string())]
    );
}

#[test]
fn test_repeated_single_style_is_kept() {
    let df = canonical_frame(
        &["2024-01-15", "2024-01-15"],
        &["A", "A"],
        &["M1", "M1"],
        &[Some("S1"), Some("S1")],
        &["01:00:00", "02:00:00"],
        &["100", "200"],
    );

    let out = drop_multi_style_shifts(df, &CleaningConfig::default()).unwrap();
    assert_eq!(out.height(), 2);
}

#[test]
fn test_missing_style_does_not_count_as_distinct() {
    let df = canonical_frame(
        &["2024-01-15", "2024-01-15"],
        &["A", "A"],
        &["M1", "M1"],
        &[Some("S1"), None],
        &["01:00:00", "02:00:00"],
        &["100", "200"],
    );

    let out = drop_multi_style_shifts(df, &CleaningConfig::default()).unwrap();
    assert_eq!(out.height(), 2);
}

#[test]
fn test_same_style_on_different_machines_is_independent() {
    let df = canonical_frame(
        &["2024-01-15", "2024-01-15", "2024-01-15"],
        &["A", "A", "A"],
        &["M1", "M2", "M2"],
        &[Some("S1"), Some("S2"), Some("S3")],
        &["01:00:00", "02:00:00", "03:00:00"],
        &["100", "200", "300"],
    );

    let out = drop_multi_style_shifts(df, &CleaningConfig::default()).unwrap();
    assert_eq!(str_values(&out, "Machine-number"), vec![Some("M1".to_string())]);
}

#[test]
fn test_numeric_machine_numbers_group_correctly() {
    let df = df!(
        "Date" => ["2024-01-15", "2024-01-15", "2024-01-15"],
        "Shift_period" => [1i64, 1, 2],
        "Machine-number" => [12i64, 12, 12],
        "Style-description" => ["S1", "S2", "S1"],
        "Run_time" => ["01:00:00", "01:00:00", "01:00:00"],
        "RPM" => [100.0f64, 200.0, 300.0],
    )
    .unwrap();

    let out = drop_multi_style_shifts(df, &CleaningConfig::default()).unwrap();
    assert_eq!(f64_values(&out, "RPM"), vec![Some(300.0)]);
}

#[test]
fn test_multi_style_groups_lists_offenders() {
    let groups = multi_style_groups(&mixed_shift_frame(), &CleaningConfig::default()).unwrap();

    assert_eq!(groups.len(), 1);
    let (key, styles) = &groups[0];
    assert_eq!(
        key,
        &(
            Some("2024-01-15".to_string()),
            Some("A".to_string()),
            Some("M1".to_string())
        )
    );
    assert_eq!(styles, &vec!["S1".to_string(), "S2".to_string()]);
}
