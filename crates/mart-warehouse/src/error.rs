//! Error types for warehouse loading.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// A prepared frame is missing a source column required by the fixed
    /// entity mapping.
    #[error("prepared {table} frame is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, WarehouseError>;
