//! Command-line entry points for the smart sales ETL.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod recipes;
