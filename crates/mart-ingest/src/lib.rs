//! Raw and prepared CSV extract reading and writing.
//!
//! Thin I/O collaborators around Polars' CSV reader and writer. Core
//! preparation stages use the strict [`read_raw`]; the lenient variant is
//! reserved for the setup check, which degrades a missing file to an empty
//! frame instead of failing the run.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use tracing::{info, warn};

pub mod error;
pub mod paths;

pub use error::{IngestError, Result};
pub use paths::{DataPaths, Entity};

/// Read a raw extract with a header row, inferring column dtypes.
/// Errors propagate; preparation stages must not run on missing input.
pub fn read_raw(path: &Path) -> Result<DataFrame> {
    info!(path = %path.display(), "reading raw extract");
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

/// Lenient raw read for the setup check: a missing or unreadable file
/// degrades to an empty frame with a logged warning.
pub fn read_raw_lenient(path: &Path) -> DataFrame {
    match read_raw(path) {
        Ok(df) => df,
        Err(error) => {
            warn!(path = %path.display(), %error, "raw extract unreadable, using empty frame");
            DataFrame::default()
        }
    }
}

/// Write a prepared extract as CSV with a header row, creating parent
/// directories as needed.
pub fn write_prepared(frame: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| IngestError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(file).include_header(true).finish(frame)?;
    info!(path = %path.display(), rows = frame.height(), "wrote prepared extract");
    Ok(())
}
