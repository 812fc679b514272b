//! The cleaning engine: a mutable container around one owned frame.
//!
//! A [`Scrubber`] wraps exactly one `DataFrame` and mutates it in place
//! across successive operation calls. There is no history or rollback; a
//! pipeline creates the scrubber, chains operations, and takes the frame
//! back with [`Scrubber::into_frame`] when done.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, Series,
};
use tracing::debug;

use crate::consistency::{ConsistencySnapshot, Phase};
use crate::datetime::{STANDARD_DATETIME_COLUMN, parse_date, parse_datetime, to_iso8601};
use crate::error::{Result, ScrubError};
use crate::inspect::{statistical_summary, structural_summary};
use crate::values::{any_to_f64, any_to_i64, any_to_string, is_integer_dtype, is_numeric_dtype};

/// Target kinds for [`Scrubber::cast_column`].
///
/// `Date` casts produce ISO 8601 date text; the relational store and the
/// prepared CSVs both carry dates as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Text,
    Boolean,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// Case transform applied by [`Scrubber::normalize_text_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    Lower,
    Upper,
}

/// Replacement value for null cells.
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FillValue {
    fn to_text(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::Float(v) => crate::values::format_numeric(*v),
            Self::Text(v) => v.clone(),
        }
    }
}

/// What to do with rows or cells containing nulls.
///
/// Exactly one mode applies per call; `Keep` is the explicit no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum MissingPolicy {
    /// Remove every row containing any null cell.
    Drop,
    /// Replace every null cell, across all columns, with the given value.
    Fill(FillValue),
    /// Leave nulls in place.
    Keep,
}

/// Stateful cleaning engine owning one frame.
#[derive(Debug, Clone)]
pub struct Scrubber {
    frame: DataFrame,
}

impl Scrubber {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Borrow the current frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the scrubber and take the cleaned frame.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    fn require_column(&self, column: &str) -> Result<()> {
        if self.frame.column(column).is_ok() {
            Ok(())
        } else {
            Err(ScrubError::ColumnNotFound {
                column: column.to_string(),
            })
        }
    }

    /// Measure per-column null counts and the fully-duplicate row count.
    ///
    /// With [`Phase::AfterCleaning`] the measurement is a hard
    /// post-condition: any remaining null or duplicate fails with
    /// [`ScrubError::ConsistencyViolation`].
    pub fn consistency_snapshot(&self, phase: Phase) -> Result<ConsistencySnapshot> {
        let mut null_counts = BTreeMap::new();
        for col in self.frame.get_columns() {
            null_counts.insert(col.name().to_string(), col.null_count());
        }
        let snapshot = ConsistencySnapshot {
            null_counts,
            duplicate_rows: self.duplicate_row_count(),
        };
        if phase == Phase::AfterCleaning && !snapshot.is_clean() {
            return Err(ScrubError::ConsistencyViolation(snapshot.to_string()));
        }
        Ok(snapshot)
    }

    /// Convert a column's values to the target kind, in place.
    ///
    /// Any non-null value that cannot convert fails the whole operation;
    /// a cast never silently coerces a value to null.
    pub fn cast_column(&mut self, column: &str, kind: ValueKind) -> Result<()> {
        self.require_column(column)?;
        let height = self.frame.height();
        let source = self.frame.column(column)?.clone();
        let series = match kind {
            ValueKind::Int => {
                let mut values: Vec<Option<i64>> = Vec::with_capacity(height);
                for idx in 0..height {
                    match source.get(idx).unwrap_or(AnyValue::Null) {
                        AnyValue::Null => values.push(None),
                        value => match any_to_i64(value.clone()) {
                            Some(v) => values.push(Some(v)),
                            None => return Err(parse_failure(column, &value, kind)),
                        },
                    }
                }
                Series::new(column.into(), values)
            }
            ValueKind::Float => {
                let mut values: Vec<Option<f64>> = Vec::with_capacity(height);
                for idx in 0..height {
                    match source.get(idx).unwrap_or(AnyValue::Null) {
                        AnyValue::Null => values.push(None),
                        value => match any_to_f64(value.clone()) {
                            Some(v) => values.push(Some(v)),
                            None => return Err(parse_failure(column, &value, kind)),
                        },
                    }
                }
                Series::new(column.into(), values)
            }
            ValueKind::Text => {
                let mut values: Vec<Option<String>> = Vec::with_capacity(height);
                for idx in 0..height {
                    match source.get(idx).unwrap_or(AnyValue::Null) {
                        AnyValue::Null => values.push(None),
                        value => values.push(Some(any_to_string(value))),
                    }
                }
                Series::new(column.into(), values)
            }
            ValueKind::Boolean => {
                let mut values: Vec<Option<bool>> = Vec::with_capacity(height);
                for idx in 0..height {
                    match source.get(idx).unwrap_or(AnyValue::Null) {
                        AnyValue::Null => values.push(None),
                        value => match parse_bool(&any_to_string(value.clone())) {
                            Some(v) => values.push(Some(v)),
                            None => return Err(parse_failure(column, &value, kind)),
                        },
                    }
                }
                Series::new(column.into(), values)
            }
            ValueKind::Date => {
                let mut values: Vec<Option<String>> = Vec::with_capacity(height);
                for idx in 0..height {
                    match source.get(idx).unwrap_or(AnyValue::Null) {
                        AnyValue::Null => values.push(None),
                        value => match parse_date(&any_to_string(value.clone())) {
                            Some(d) => values.push(Some(d.format("%Y-%m-%d").to_string())),
                            None => return Err(parse_failure(column, &value, kind)),
                        },
                    }
                }
                Series::new(column.into(), values)
            }
        };
        self.frame.with_column(series)?;
        debug!(column, kind = %kind, "cast column");
        Ok(())
    }

    /// Remove the named columns. All names are validated before any column
    /// is removed, so the operation is all-or-nothing. A name repeated in
    /// the list counts as one removal.
    pub fn drop_columns(&mut self, columns: &[&str]) -> Result<()> {
        let mut unique = Vec::with_capacity(columns.len());
        for column in columns {
            self.require_column(column)?;
            if !unique.contains(column) {
                unique.push(*column);
            }
        }
        for column in unique {
            self.frame = self.frame.drop(column)?;
        }
        Ok(())
    }

    /// Keep only rows whose value in `column` lies in `[lower, upper]`
    /// inclusive. Rows with a null in that column are excluded, since a
    /// comparison against null is false.
    pub fn filter_numeric_range(&mut self, column: &str, lower: f64, upper: f64) -> Result<()> {
        self.require_column(column)?;
        let height = self.frame.height();
        let mut keep = Vec::with_capacity(height);
        {
            let col = self.frame.column(column)?;
            for idx in 0..height {
                let in_range = any_to_f64(col.get(idx).unwrap_or(AnyValue::Null))
                    .map(|v| v >= lower && v <= upper)
                    .unwrap_or(false);
                keep.push(in_range);
            }
        }
        let mask = BooleanChunked::from_slice("range".into(), &keep);
        self.frame = self.frame.filter(&mask)?;
        debug!(column, lower, upper, rows = self.frame.height(), "filtered numeric range");
        Ok(())
    }

    /// Coerce every cell in `column` to text, apply the case transform, and
    /// trim surrounding whitespace. Nulls stringify to the empty string.
    pub fn normalize_text_case(&mut self, column: &str, case: CaseMode) -> Result<()> {
        self.require_column(column)?;
        let height = self.frame.height();
        let source = self.frame.column(column)?.clone();
        let mut values = Vec::with_capacity(height);
        for idx in 0..height {
            let text = any_to_string(source.get(idx).unwrap_or(AnyValue::Null));
            let trimmed = text.trim();
            values.push(match case {
                CaseMode::Lower => trimmed.to_lowercase(),
                CaseMode::Upper => trimmed.to_uppercase(),
            });
        }
        self.frame.with_column(Series::new(column.into(), values))?;
        Ok(())
    }

    /// Apply a [`MissingPolicy`] to the whole frame.
    pub fn handle_missing(&mut self, policy: &MissingPolicy) -> Result<()> {
        match policy {
            MissingPolicy::Keep => Ok(()),
            MissingPolicy::Drop => self.drop_rows_with_nulls(),
            MissingPolicy::Fill(value) => self.fill_nulls(value),
        }
    }

    fn drop_rows_with_nulls(&mut self) -> Result<()> {
        let height = self.frame.height();
        let mut keep = vec![true; height];
        for col in self.frame.get_columns() {
            if col.null_count() == 0 {
                continue;
            }
            for (idx, flag) in keep.iter_mut().enumerate() {
                if matches!(col.get(idx).unwrap_or(AnyValue::Null), AnyValue::Null) {
                    *flag = false;
                }
            }
        }
        let mask = BooleanChunked::from_slice("non_null".into(), &keep);
        self.frame = self.frame.filter(&mask)?;
        debug!(rows = self.frame.height(), "dropped rows with nulls");
        Ok(())
    }

    fn fill_nulls(&mut self, fill: &FillValue) -> Result<()> {
        let height = self.frame.height();
        let targets: Vec<(String, DataType)> = self
            .frame
            .get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| (col.name().to_string(), col.dtype().clone()))
            .collect();
        for (name, dtype) in targets {
            let source = self.frame.column(&name)?.clone();
            let series = match fill {
                FillValue::Int(fill_value) if is_integer_dtype(&dtype) => {
                    let mut values = Vec::with_capacity(height);
                    for idx in 0..height {
                        let value = source.get(idx).unwrap_or(AnyValue::Null);
                        values.push(any_to_i64(value).unwrap_or(*fill_value));
                    }
                    Series::new(name.as_str().into(), values)
                }
                FillValue::Int(fill_value) if is_numeric_dtype(&dtype) => {
                    let mut values = Vec::with_capacity(height);
                    for idx in 0..height {
                        let value = source.get(idx).unwrap_or(AnyValue::Null);
                        values.push(any_to_f64(value).unwrap_or(*fill_value as f64));
                    }
                    Series::new(name.as_str().into(), values)
                }
                FillValue::Float(fill_value) if is_numeric_dtype(&dtype) => {
                    let mut values = Vec::with_capacity(height);
                    for idx in 0..height {
                        let value = source.get(idx).unwrap_or(AnyValue::Null);
                        values.push(any_to_f64(value).unwrap_or(*fill_value));
                    }
                    Series::new(name.as_str().into(), values)
                }
                // Mismatched kinds fall back to text, the way fillna upcasts.
                _ => {
                    let fill_text = fill.to_text();
                    let mut values = Vec::with_capacity(height);
                    for idx in 0..height {
                        match source.get(idx).unwrap_or(AnyValue::Null) {
                            AnyValue::Null => values.push(fill_text.clone()),
                            value => values.push(any_to_string(value)),
                        }
                    }
                    Series::new(name.as_str().into(), values)
                }
            };
            self.frame.with_column(series)?;
        }
        Ok(())
    }

    /// Remove rows that are exact duplicates of an earlier row across all
    /// columns, keeping the first occurrence.
    pub fn deduplicate(&mut self) -> Result<()> {
        let height = self.frame.height();
        let mut seen = BTreeSet::new();
        let mut keep = Vec::with_capacity(height);
        for idx in 0..height {
            keep.push(seen.insert(self.row_key(idx)));
        }
        let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
        let before = self.frame.height();
        self.frame = self.frame.filter(&mask)?;
        debug!(removed = before - self.frame.height(), "deduplicated rows");
        Ok(())
    }

    /// Rename columns from old to new names, atomically: every old name is
    /// validated before any rename is applied.
    pub fn rename_columns(&mut self, mapping: &[(&str, &str)]) -> Result<()> {
        for (old, _) in mapping {
            self.require_column(old)?;
        }
        for (old, new) in mapping {
            self.frame.rename(old, (*new).into())?;
        }
        Ok(())
    }

    /// Reorder the frame's columns to exactly the given sequence.
    ///
    /// The sequence must be a permutation of all current columns; a missing
    /// column fails with [`ScrubError::NotAPermutation`] and an unknown name
    /// with [`ScrubError::ColumnNotFound`]. Use [`Scrubber::select_columns`]
    /// to drop columns on purpose.
    pub fn reorder_columns(&mut self, order: &[&str]) -> Result<()> {
        for column in order {
            self.require_column(column)?;
        }
        let missing: Vec<String> = self
            .frame
            .get_column_names()
            .iter()
            .filter(|name| !order.iter().any(|o| *o == name.as_str()))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ScrubError::NotAPermutation {
                missing: missing.join(", "),
            });
        }
        self.frame = self.frame.select(order.iter().copied())?;
        Ok(())
    }

    /// Project the frame to exactly the given columns, dropping the rest.
    /// All names are validated before the projection is applied.
    pub fn select_columns(&mut self, columns: &[&str]) -> Result<()> {
        for column in columns {
            self.require_column(column)?;
        }
        self.frame = self.frame.select(columns.iter().copied())?;
        Ok(())
    }

    /// Parse `source_column` with the permissive date/time parser and write
    /// ISO 8601 text into the fixed derived column `StandardDateTime`.
    /// Null source cells stay null; any other unparseable value fails.
    pub fn derive_standard_datetime(&mut self, source_column: &str) -> Result<()> {
        self.require_column(source_column)?;
        let height = self.frame.height();
        let source = self.frame.column(source_column)?.clone();
        let mut values: Vec<Option<String>> = Vec::with_capacity(height);
        for idx in 0..height {
            match source.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::Null => values.push(None),
                value => {
                    let text = any_to_string(value);
                    match parse_datetime(&text) {
                        Some(parsed) => values.push(Some(to_iso8601(&parsed))),
                        None => {
                            return Err(ScrubError::Parse {
                                column: source_column.to_string(),
                                value: text,
                                kind: "datetime".to_string(),
                            });
                        }
                    }
                }
            }
        }
        self.frame
            .with_column(Series::new(STANDARD_DATETIME_COLUMN.into(), values))?;
        Ok(())
    }

    /// Trim surrounding whitespace from every column name.
    pub fn normalize_headers(&mut self) -> Result<()> {
        let renames: Vec<(String, String)> = self
            .frame
            .get_column_names()
            .iter()
            .filter(|name| name.as_str() != name.as_str().trim())
            .map(|name| (name.to_string(), name.as_str().trim().to_string()))
            .collect();
        for (old, new) in renames {
            self.frame.rename(&old, new.as_str().into())?;
        }
        Ok(())
    }

    /// Lowercase every column name, trim it, and replace inner spaces with
    /// underscores.
    pub fn normalize_headers_snake(&mut self) -> Result<()> {
        let renames: Vec<(String, String)> = self
            .frame
            .get_column_names()
            .iter()
            .map(|name| {
                let snake = name.as_str().trim().to_lowercase().replace(' ', "_");
                (name.to_string(), snake)
            })
            .filter(|(old, new)| old != new)
            .collect();
        for (old, new) in renames {
            self.frame.rename(&old, new.as_str().into())?;
        }
        Ok(())
    }

    /// Produce a structural summary (column kinds, non-null counts) and a
    /// statistical summary (count/mean/std/min/max per numeric column) as
    /// two text artifacts. Read-only.
    pub fn inspect(&self) -> (String, String) {
        (
            structural_summary(&self.frame),
            statistical_summary(&self.frame),
        )
    }

    fn duplicate_row_count(&self) -> usize {
        let mut seen = BTreeSet::new();
        let mut duplicates = 0;
        for idx in 0..self.frame.height() {
            if !seen.insert(self.row_key(idx)) {
                duplicates += 1;
            }
        }
        duplicates
    }

    // Composite row key over all columns. Debug formatting keeps null
    // distinct from the empty string.
    fn row_key(&self, idx: usize) -> String {
        let mut key = String::new();
        for (pos, col) in self.frame.get_columns().iter().enumerate() {
            if pos > 0 {
                key.push('|');
            }
            let value = col.get(idx).unwrap_or(AnyValue::Null);
            key.push_str(&format!("{value:?}"));
        }
        key
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn parse_failure(column: &str, value: &AnyValue<'_>, kind: ValueKind) -> ScrubError {
    ScrubError::Parse {
        column: column.to_string(),
        value: any_to_string(value.clone()),
        kind: kind.to_string(),
    }
}
