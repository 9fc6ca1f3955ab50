//! Spreadsheet workbook reader (`.xlsx`/`.xls`, first sheet) and `.xlsx` writer
//!
//! Workbooks carry per-cell types rather than per-column types, so the
//! reader decides a column's type from its cells: all-numeric columns
//! become numbers, all-boolean columns booleans, everything else text.
//! Date cells are rendered as ISO dates and time/duration cells as
//! `HH:MM:SS` so runtime values survive as duration text.
//!
//! Precision caveats: the writer stores dates and other non-numeric values
//! as text, and integer columns come back as `Float64` because the
//! container only stores floating-point numbers.

use crate::error::{CleanError, Result};
use crate::models::FileFormat;
use calamine::{Data, ExcelDateTime, Range, Reader, Xls, Xlsx, open_workbook};
use chrono::Timelike;
use polars::prelude::*;
use rust_xlsxwriter::Workbook;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Read the first sheet of a workbook into a frame
pub fn read_workbook(path: &Path, format: FileFormat) -> Result<DataFrame> {
    let range = match format {
        FileFormat::Xls => {
            let mut workbook: Xls<_> =
                open_workbook(path).map_err(|e| CleanError::read(path, e))?;
            first_sheet(&mut workbook, path)?
        }
        _ => {
            let mut workbook: Xlsx<_> =
                open_workbook(path).map_err(|e| CleanError::read(path, e))?;
            first_sheet(&mut workbook, path)?
        }
    };

    range_to_frame(&range)
}

fn first_sheet<R>(workbook: &mut R, path: &Path) -> Result<Range<Data>>
where
    R: Reader<BufReader<File>>,
    R::Error: std::fmt::Display,
{
    match workbook.worksheet_range_at(0) {
        Some(range) => range.map_err(|e| CleanError::read(path, e)),
        None => Err(CleanError::read(path, "workbook contains no sheets")),
    }
}

/// Convert a cell range (header row first) into a frame
pub fn range_to_frame(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };

    let names = unique_headers(header);
    let body: Vec<&[Data]> = rows.collect();
    debug!(
        "Workbook sheet: {} columns, {} data rows",
        names.len(),
        body.len()
    );

    let columns = names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                .collect();
            build_column(name, &cells)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Header cells as text; blanks become `Unnamed: N` and repeats get a `.N` suffix
fn unique_headers(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = cell_text(cell).unwrap_or_else(|| format!("Unnamed: {idx}"));
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;
            name
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Int,
    Float,
    Bool,
    Text,
}

fn cell_kind(cell: &Data) -> Option<CellKind> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::Int(_) => Some(CellKind::Int),
        Data::Float(_) => Some(CellKind::Float),
        Data::Bool(_) => Some(CellKind::Bool),
        _ => Some(CellKind::Text),
    }
}

fn column_kind(cells: &[&Data]) -> CellKind {
    cells
        .iter()
        .filter_map(|cell| cell_kind(cell))
        .reduce(|acc, kind| match (acc, kind) {
            (a, b) if a == b => a,
            (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => {
                CellKind::Float
            }
            _ => CellKind::Text,
        })
        .unwrap_or(CellKind::Text)
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    match column_kind(cells) {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Int(v) => Some(*v as f64),
                    Data::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell_text(cell)).collect();
            Column::new(name.into(), values)
        }
    }
}

/// Render one cell as text; `None` for blanks and error cells
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(v) => Some(v.to_string()),
        Data::Float(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(dt) => Some(render_excel_datetime(dt)),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => {
            warn!("Workbook cell error {:?} treated as blank", e);
            None
        }
    }
}

fn render_excel_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(duration) = dt.as_duration() {
            return format_hms(duration.num_seconds());
        }
    }

    // serial values below one day carry only a time of day
    if dt.as_f64() < 1.0 {
        if let Some(value) = dt.as_datetime() {
            return format_hms(i64::from(value.time().num_seconds_from_midnight()));
        }
    }

    match dt.as_datetime() {
        Some(value) if value.time().num_seconds_from_midnight() == 0 => {
            value.date().format("%Y-%m-%d").to_string()
        }
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

fn format_hms(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let secs = total_seconds.abs();
    format!(
        "{sign}{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Write a frame to the first sheet of a new `.xlsx` workbook
pub fn write_xlsx(df: &DataFrame, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = u16::try_from(col_idx)
            .map_err(|_| CleanError::write(path, "too many columns for a worksheet"))?;

        worksheet
            .write_string(0, col, column.name().as_str())
            .map_err(|e| CleanError::write(path, e))?;

        match column.dtype() {
            DataType::Boolean => {
                for (row, value) in column.bool()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet
                            .write_boolean(sheet_row(row, path)?, col, value)
                            .map_err(|e| CleanError::write(path, e))?;
                    }
                }
            }
            DataType::Int32
            | DataType::Int64
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => {
                let values = column.cast(&DataType::Float64)?;
                for (row, value) in values.f64()?.into_iter().enumerate() {
                    if let Some(value) = value.filter(|v| v.is_finite()) {
                        worksheet
                            .write_number(sheet_row(row, path)?, col, value)
                            .map_err(|e| CleanError::write(path, e))?;
                    }
                }
            }
            _ => {
                let values = column.cast(&DataType::String)?;
                for (row, value) in values.str()?.into_iter().enumerate() {
                    if let Some(value) = value {
                        worksheet
                            .write_string(sheet_row(row, path)?, col, value)
                            .map_err(|e| CleanError::write(path, e))?;
                    }
                }
            }
        }
    }

    workbook.save(path).map_err(|e| CleanError::write(path, e))
}

/// Worksheet row for a 0-based data row (row 0 holds the header)
fn sheet_row(row: usize, path: &Path) -> Result<u32> {
    u32::try_from(row + 1).map_err(|_| CleanError::write(path, "too many rows for a worksheet"))
}
