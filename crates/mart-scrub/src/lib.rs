//! Reusable cleaning engine for tabular sales extracts.
//!
//! The [`Scrubber`] wraps one owned Polars `DataFrame` and exposes a library
//! of composable cleaning operations (casting, filtering, dedup, missing
//! handling, text normalization, datetime derivation) plus consistency
//! checks taken before and after cleaning. Preparation pipelines sequence
//! calls on a scrubber and hand the cleaned frame to the warehouse loader.

pub mod consistency;
pub mod datetime;
pub mod error;
pub mod inspect;
pub mod scrubber;
pub mod values;

pub use consistency::{ConsistencySnapshot, Phase};
pub use error::{Result, ScrubError};
pub use scrubber::{CaseMode, FillValue, MissingPolicy, Scrubber, ValueKind};
