//! Successful job runs across output formats

use super::*;
use crate::config::{CompressionAlgorithm, WriteOptions};
use crate::constants::{ROW_INDEX_COLUMN, derived::MACHINE_EFFICIENCY};
use crate::formats::read_table;
use crate::models::{FileFormat, JobStats};
use crate::processor::{JobRequest, run, run_job, run_job_with_report};
use tempfile::TempDir;

#[test]
fn test_csv_to_csv_job() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.csv");

    let stats = run(&input, &output, &permissive_config(), None, None).unwrap();

    assert_eq!(stats, JobStats::new(5, 3));
    let cleaned = read_table(&output, None).unwrap();
    assert_eq!(cleaned.height(), 3);
    assert!(cleaned.column(MACHINE_EFFICIENCY).is_ok());
}

#[test]
fn test_csv_to_parquet_with_compression() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("out").join("clean.parquet");
    let options = WriteOptions::default().with_compression(CompressionAlgorithm::Zstd);

    let stats = run_job(
        &JobRequest::new(&input, &output),
        &permissive_config(),
        &options,
    )
    .unwrap();

    assert_eq!(stats.output_rows, 3);
    assert_eq!(read_table(&output, None).unwrap().height(), 3);
}

#[test]
fn test_csv_to_xlsx_job() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.xlsx");

    let stats = run(&input, &output, &permissive_config(), None, None).unwrap();

    assert_eq!(stats.rows_removed, 2);
    let cleaned = read_table(&output, None).unwrap();
    assert_eq!(cleaned.height(), 3);
    assert_eq!(cleaned.width(), 10);
}

#[test]
fn test_format_overrides_for_unknown_extensions() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("export.dat");
    std::fs::write(&input, RAW_EXPORT_CSV).unwrap();
    let output = dir.path().join("clean.out");

    let request = JobRequest::new(&input, &output)
        .with_input_format(Some(FileFormat::Csv))
        .with_output_format(Some(FileFormat::Parquet));
    run_job(&request, &permissive_config(), &WriteOptions::default()).unwrap();

    let cleaned = read_table(&output, Some(FileFormat::Parquet)).unwrap();
    assert_eq!(cleaned.height(), 3);
}

#[test]
fn test_row_index_written_when_requested() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.csv");

    run_job(
        &JobRequest::new(&input, &output),
        &permissive_config(),
        &WriteOptions::default().with_row_index(),
    )
    .unwrap();

    let cleaned = read_table(&output, None).unwrap();
    assert_eq!(cleaned.get_column_names()[0].as_str(), ROW_INDEX_COLUMN);
}

#[test]
fn test_report_breaks_down_removed_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.csv");

    let outcome = run_job_with_report(
        &JobRequest::new(&input, &output),
        &permissive_config(),
        &WriteOptions::default(),
    )
    .unwrap();

    assert_eq!(outcome.report.invalid_rows, 1);
    assert_eq!(outcome.report.rpm_outliers, 1);
    assert_eq!(outcome.report.total_removed(), outcome.stats.rows_removed);
}

#[test]
fn test_default_bounds_can_empty_the_table() {
    let dir = TempDir::new().unwrap();
    let input = write_export(dir.path());
    let output = dir.path().join("clean.csv");

    let stats = run(&input, &output, &CleaningConfig::default(), None, None).unwrap();

    assert_eq!(stats.output_rows, 0);
    assert_eq!(stats.removal_rate(), 100.0);
    assert!(output.exists());
}
