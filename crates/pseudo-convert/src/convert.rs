//! CSV to Parquet conversion.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use pseudo_core::{AtomicWriteOptions, atomic_write_path};

use crate::error::{ConvertError, Result};

/// Extension of converted files.
pub const PARQUET_EXTENSION: &str = "parquet";

/// Target path for a converted file: `source` with its extension replaced.
pub fn parquet_path_for(source: &Path) -> PathBuf {
    source.with_extension(PARQUET_EXTENSION)
}

/// Reads a CSV file with a single header row into a DataFrame.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| ConvertError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| ConvertError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Writes `df` to a new Parquet file at `path`, atomically.
///
/// Fails without touching anything if `path` already exists.
pub fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let committed = atomic_write_path(path, &AtomicWriteOptions::binary(), |staged| {
        let file = File::create(staged).map_err(|e| ConvertError::FileWrite {
            path: staged.to_path_buf(),
            source: e,
        })?;

        ParquetWriter::new(file)
            .finish(df)
            .map_err(|e| ConvertError::ParquetWrite {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok::<_, ConvertError>(path.to_path_buf())
    })?;

    tracing::info!(
        path = %committed.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote parquet file"
    );
    Ok(committed)
}

/// Converts a CSV file to Parquet next to it and returns the Parquet path.
pub fn convert_csv_to_parquet(source: &Path) -> Result<PathBuf> {
    let mut df = read_csv(source)?;
    let target = parquet_path_for(source);
    tracing::debug!(
        source = %source.display(),
        output = %target.display(),
        "converting CSV to parquet"
    );
    write_parquet(&mut df, &target)
}
