//! Table reading and writing across the supported file formats.
//!
//! The format is taken from an explicit override when given, otherwise
//! from the file extension. Each [`FileFormat`] variant maps onto exactly
//! one reader and one writer; this is the only module that touches the
//! filesystem for table data.

pub mod csv;
pub mod parquet;
pub mod workbook;

use crate::config::WriteOptions;
use crate::constants::ROW_INDEX_COLUMN;
use crate::error::{CleanError, Result};
use crate::models::FileFormat;
use polars::prelude::*;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Read a table from `source`
///
/// # Errors
///
/// `UnsupportedFormat` when neither the override nor the extension names a
/// known format; `Io`/`Read` when the file is missing or its container is
/// malformed.
pub fn read_table(source: &Path, format_override: Option<FileFormat>) -> Result<DataFrame> {
    let format = FileFormat::resolve(source, format_override)?;
    debug!("Reading {} as {}", source.display(), format);

    if !source.exists() {
        return Err(CleanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", source.display()),
        )));
    }

    let df = match format {
        FileFormat::Csv => csv::read_csv(source)?,
        FileFormat::Xlsx | FileFormat::Xls => workbook::read_workbook(source, format)?,
        FileFormat::Parquet => parquet::read_parquet(source)?,
    };

    info!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        source.display()
    );
    Ok(df)
}

/// Write `df` to `destination`, creating or overwriting it
///
/// # Errors
///
/// `UnsupportedFormat` for unknown formats and for the legacy `.xls`
/// container, which cannot be produced; `Io`/`Write` on filesystem or
/// encoder failures.
pub fn write_table(
    df: &DataFrame,
    destination: &Path,
    format_override: Option<FileFormat>,
    options: &WriteOptions,
) -> Result<()> {
    let format = FileFormat::resolve(destination, format_override)?;
    if format == FileFormat::Xls {
        return Err(xls_write_unsupported());
    }

    let staging = staging_file(destination)?;

    let mut out = if options.include_row_index {
        df.with_row_index(ROW_INDEX_COLUMN.into(), None)?
    } else {
        df.clone()
    };

    debug!(
        "Writing {} rows to {} as {}",
        out.height(),
        destination.display(),
        format
    );

    let staged = staging.path();
    match format {
        FileFormat::Csv => csv::write_csv(&mut out, staged)?,
        FileFormat::Xlsx => workbook::write_xlsx(&out, staged)?,
        FileFormat::Parquet => parquet::write_parquet(&mut out, staged, options.compression)?,
        FileFormat::Xls => return Err(xls_write_unsupported()),
    }
    staging
        .persist(destination)
        .map_err(|e| CleanError::write(destination, e.error))?;

    info!("Wrote {} rows to {}", out.height(), destination.display());
    Ok(())
}

/// Empty temporary file next to `destination`, creating missing parent
/// directories
///
/// Encoders write here and the file is renamed over the destination only
/// once complete; dropping it on an error path deletes it.
fn staging_file(destination: &Path) -> Result<NamedTempFile> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let suffix = destination
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    Ok(tempfile::Builder::new()
        .prefix(".shiftclean-")
        .suffix(&suffix)
        .tempfile_in(dir)?)
}

pub(crate) fn xls_write_unsupported() -> CleanError {
    CleanError::unsupported_format("xls (legacy workbooks can be read but not written; use xlsx)")
}
