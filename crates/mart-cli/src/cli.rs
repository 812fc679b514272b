//! CLI argument definitions for the smart sales ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "salesmart",
    version,
    about = "Smart sales ETL - clean raw extracts and load the warehouse",
    long_about = "Clean raw customer, product, and sales extracts with the\n\
                  reusable scrubber, then load the prepared tables into the\n\
                  SQLite data warehouse with full-reload semantics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Project root containing the data/ directory (default: current dir).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify setup: read each raw extract leniently and report its shape.
    Check,

    /// Clean one raw extract (or all) and write the prepared CSV.
    Prepare(PrepareArgs),

    /// Load the prepared extracts into the warehouse (full reload).
    Load,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Which extract to prepare.
    #[arg(value_enum, default_value = "all")]
    pub entity: EntityArg,

    /// Print the structural and statistical summaries after cleaning.
    #[arg(long = "inspect")]
    pub inspect: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Customers,
    Products,
    Sales,
    All,
}
