//! CLI argument definitions for the pseudonymization tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use pseudo_core::SALT_ENV_VAR;
use tracing::level_filters::LevelFilter;

use crate::logging::LogFormat;

#[derive(Parser)]
#[command(
    name = "pseudo",
    version,
    about = "Salted user ids and atomic CSV to Parquet conversion",
    long_about = "Issue pseudonymous user ids from a secret salt and convert CSV data to Parquet.\n\n\
                  Output files are staged next to their target and committed with a single\n\
                  rename, so readers never see a partially written file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Environment variable holding the hex-encoded salt.
    #[arg(
        long = "salt-env",
        value_name = "VAR",
        default_value = SALT_ENV_VAR,
        global = true
    )]
    pub salt_env: String,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow usernames to appear in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the pseudonymous id for each username.
    UserId(UserIdArgs),

    /// Convert a CSV file to Parquet next to the source.
    Convert(ConvertArgs),

    /// Print selected columns of a Parquet file.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct UserIdArgs {
    /// Usernames to pseudonymize (case-insensitive).
    #[arg(value_name = "USERNAME", required = true)]
    pub usernames: Vec<String>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// CSV file to convert.
    #[arg(value_name = "CSV")]
    pub source: PathBuf,

    /// Replace this column with salted ids before writing.
    ///
    /// Requires the salt variable to be set.
    #[arg(long = "pseudonymize", value_name = "COLUMN")]
    pub pseudonymize: Option<String>,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Parquet file to read.
    #[arg(value_name = "PARQUET")]
    pub path: PathBuf,

    /// Column to read (repeatable, output keeps this order).
    #[arg(long = "column", short = 'c', value_name = "NAME", required = true)]
    pub columns: Vec<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
