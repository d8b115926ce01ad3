//! `pseudo` command-line entry point.

use clap::{ColorChoice, Parser};
use pseudo_cli::cli::{Cli, Command};
use pseudo_cli::commands::{load_hasher, run_columns, run_convert, run_user_id};
use pseudo_cli::logging::{LogConfig, init_logging};
use pseudo_cli::summary::{print_columns, print_output, print_user_ids};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::UserId(args) => load_hasher(&cli.salt_env).map(|hasher| {
            print_user_ids(&run_user_id(args, &hasher));
        }),
        Command::Convert(args) => {
            run_convert(args, &cli.salt_env).map(|output| print_output(&output))
        }
        Command::Columns(args) => run_columns(args).map(|df| print_columns(&df)),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// `--log-level` wins over `-v/-q`; either one disables the `RUST_LOG` override.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = cli
        .log_level
        .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from);
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_env_override(!explicit)
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_ansi(ansi)
}
