//! Columnar-binary (Parquet) reader and writer

use crate::config::CompressionAlgorithm;
use crate::error::{CleanError, Result};
use polars::prelude::{DataFrame, ParquetReader, ParquetWriter, SerReader};
use std::fs::File;
use std::path::Path;
use tracing::debug;

pub fn read_parquet(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| CleanError::read(path, e))
}

/// Write a frame to parquet with the requested compression
pub fn write_parquet(
    df: &mut DataFrame,
    path: &Path,
    compression: CompressionAlgorithm,
) -> Result<()> {
    debug!("Parquet write config: compression={:?}", compression);

    let file = File::create(path)?;
    ParquetWriter::new(file)
        .with_compression(compression.to_polars_compression())
        .finish(df)
        .map_err(|e| CleanError::write(path, e))?;

    Ok(())
}
