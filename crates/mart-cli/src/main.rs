//! Smart sales ETL CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};

use mart_cli::cli::{Cli, Command};
use mart_cli::commands::{run_check, run_load, run_prepare};
use mart_cli::logging::{LogConfig, init_logging};
use mart_ingest::DataPaths;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));
    let paths = cli
        .data_dir
        .clone()
        .map(DataPaths::new)
        .unwrap_or_default();
    let exit_code = match &cli.command {
        Command::Check => report(run_check(&paths)),
        Command::Prepare(args) => report(run_prepare(&paths, args)),
        Command::Load => report(run_load(&paths)),
    };
    std::process::exit(exit_code);
}

fn report(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        },
    }
}
