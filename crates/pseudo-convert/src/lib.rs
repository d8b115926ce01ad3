//! Data conversion on top of the atomic write primitive.
//!
//! This crate is a thin layer over Polars:
//!
//! - **Conversion**: CSV sources become Parquet files next to them, committed
//!   through an atomic write so a half-written Parquet file is never visible
//! - **Column projection**: read selected columns back, in the requested order
//! - **Pseudonymization**: swap an identifying column for salted ids
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pseudo_convert::{convert_csv_to_parquet, read_parquet_columns};
//!
//! let parquet = convert_csv_to_parquet(Path::new("data/hashed.csv"))?;
//! let ids = read_parquet_columns(&parquet, &["hashed_id"])?;
//! ```

mod columns;
mod convert;
mod error;
mod pseudonymize;

// === Error Types ===
pub use error::{ConvertError, Result};

// === Conversion ===
pub use convert::{PARQUET_EXTENSION, convert_csv_to_parquet, parquet_path_for, read_csv, write_parquet};

// === Reading ===
pub use columns::read_parquet_columns;

// === Pseudonymization ===
pub use pseudonymize::pseudonymize_column;
