//! Comma-separated text reader and writer

use crate::error::{CleanError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Read a CSV file with a header row
///
/// Column types are inferred from every row, so a stray text cell late in a
/// numeric column turns that column into text instead of failing the read.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| CleanError::read(path, e))?
        .finish()
        .map_err(|e| CleanError::read(path, e))
}

/// Write a frame as CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| CleanError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_keeps_text_columns_as_text() {
        let file = create_temp_csv(
            "Date,Run_time,RPM\n2024-01-15,07:30:00,5500\n2024-01-16,08:00:00,5800\n",
        );
        let df = read_csv(file.path()).unwrap();

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("Run_time").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("RPM").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_late_text_cell_makes_column_text() {
        let mut body = String::from("RPM,Machine-number\n");
        for i in 0..150 {
            let rpm = match i {
                110 => "5500.5".to_string(),
                120 => "N/A".to_string(),
                _ => "5500".to_string(),
            };
            body.push_str(&format!("{rpm},{i}\n"));
        }
        let file = create_temp_csv(&body);

        let df = read_csv(file.path()).unwrap();
        assert_eq!(df.height(), 150);
        assert_eq!(df.column("RPM").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Machine-number").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_late_float_widens_integer_column() {
        let mut body = String::from("RPM\n");
        for i in 0..150 {
            body.push_str(if i == 140 { "5500.5\n" } else { "5500\n" });
        }
        let file = create_temp_csv(&body);

        let df = read_csv(file.path()).unwrap();
        assert_eq!(df.column("RPM").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_read_csv_with_empty_cells() {
        let file = create_temp_csv("A,B\n1,\n,y\n");
        let df = read_csv(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("A").unwrap().null_count(), 1);
    }
}
