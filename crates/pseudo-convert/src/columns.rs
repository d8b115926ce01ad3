//! Column-selective Parquet reads.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::{ConvertError, Result};

/// Reads only `columns` from a Parquet file.
///
/// The result holds exactly the requested columns, in the requested order.
/// Column types are whatever the file stores; nothing is cast.
pub fn read_parquet_columns<S: AsRef<str>>(path: &Path, columns: &[S]) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConvertError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let names: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();

    let mut reader = ParquetReader::new(file);
    let schema = reader.schema().map_err(|e| ConvertError::ParquetRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if let Some(missing) = names.iter().find(|name| !schema.contains(name.as_str())) {
        return Err(ConvertError::ColumnNotFound {
            column: missing.clone(),
            path: path.to_path_buf(),
        });
    }

    let df = reader
        .with_columns(Some(names.clone()))
        .finish()
        .map_err(|e| ConvertError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    // Projection follows file order; restore the caller's order.
    let df = df.select(names.iter().map(String::as_str))?;

    tracing::debug!(
        path = %path.display(),
        columns = ?names,
        rows = df.height(),
        "read parquet columns"
    );
    Ok(df)
}
