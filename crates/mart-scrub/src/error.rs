//! Error types for cleaning operations.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by [`crate::Scrubber`] operations.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// A requested column is absent from the frame.
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    /// The post-cleaning consistency check found remaining nulls or
    /// duplicate rows. Fatal: the pipeline must stop.
    #[error("consistency violation: {0}")]
    ConsistencyViolation(String),

    /// A value could not be converted to the requested kind.
    #[error("cannot parse '{value}' in column '{column}' as {kind}")]
    Parse {
        column: String,
        value: String,
        kind: String,
    },

    /// A reorder listed only a subset of the frame's columns.
    #[error("reorder must list every column; missing: {missing}")]
    NotAPermutation { missing: String },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ScrubError>;
