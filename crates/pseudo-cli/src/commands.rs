use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use pseudo_convert::{
    convert_csv_to_parquet, parquet_path_for, pseudonymize_column, read_csv, read_parquet_columns,
    write_parquet,
};
use pseudo_core::SaltedHasher;

use crate::cli::{ColumnsArgs, ConvertArgs, UserIdArgs};
use crate::logging::redact_value;

/// One issued id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdRow {
    pub username: String,
    pub id: String,
}

/// Load the salted hasher from the named environment variable.
pub fn load_hasher(salt_env: &str) -> Result<SaltedHasher> {
    SaltedHasher::from_env(salt_env)
        .with_context(|| format!("failed to load salt from ${salt_env}"))
}

pub fn run_user_id(args: &UserIdArgs, hasher: &SaltedHasher) -> Vec<UserIdRow> {
    let rows: Vec<UserIdRow> = args
        .usernames
        .iter()
        .map(|username| {
            let id = hasher.user_id(username);
            debug!(username = redact_value(username), id = %id, "issued user id");
            UserIdRow {
                username: username.clone(),
                id,
            }
        })
        .collect();
    info!(count = rows.len(), "issued user ids");
    rows
}

/// Convert the CSV source, optionally pseudonymizing one column first.
///
/// The salt is only loaded when a column is pseudonymized.
pub fn run_convert(args: &ConvertArgs, salt_env: &str) -> Result<PathBuf> {
    let Some(column) = &args.pseudonymize else {
        return convert_csv_to_parquet(&args.source)
            .with_context(|| format!("convert {}", args.source.display()));
    };

    let hasher = load_hasher(salt_env)?;
    let df = read_csv(&args.source).with_context(|| format!("read {}", args.source.display()))?;
    let mut df = pseudonymize_column(&df, column, hasher.salt())
        .with_context(|| format!("pseudonymize column {column}"))?;
    let output = parquet_path_for(&args.source);
    write_parquet(&mut df, &output).with_context(|| format!("write {}", output.display()))?;
    Ok(output)
}

pub fn run_columns(args: &ColumnsArgs) -> Result<DataFrame> {
    read_parquet_columns(&args.path, &args.columns)
        .with_context(|| format!("read columns from {}", args.path.display()))
}
