//! Error types for data conversion.

use std::path::PathBuf;

use pseudo_core::{HashError, WriteError};
use thiserror::Error;

/// Errors that can occur while converting, reading or pseudonymizing data.
#[derive(Debug, Error)]
pub enum ConvertError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open the staged output file.
    #[error("failed to open {path} for writing: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The atomic write itself failed (target exists, commit failed, ...).
    #[error(transparent)]
    Write(#[from] WriteError),

    // === Format Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to read a Parquet file.
    #[error("failed to read Parquet {path}: {message}")]
    ParquetRead { path: PathBuf, message: String },

    /// Failed to encode a Parquet file.
    #[error("failed to write Parquet {path}: {message}")]
    ParquetWrite { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Requested column is not in the file.
    #[error("column '{column}' not found in {path}")]
    ColumnNotFound { column: String, path: PathBuf },

    /// A cell could not be hashed.
    #[error("cannot pseudonymize column '{column}'")]
    Pseudonymize {
        column: String,
        #[source]
        source: HashError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ConvertError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
