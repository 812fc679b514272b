//! Null and duplicate measurements taken before and after cleaning.

use std::collections::BTreeMap;
use std::fmt;

/// When a consistency snapshot is taken. The after-cleaning variant turns
/// the measurement into a hard post-condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeCleaning,
    AfterCleaning,
}

/// Per-column null counts plus the count of fully-duplicate rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencySnapshot {
    pub null_counts: BTreeMap<String, usize>,
    pub duplicate_rows: usize,
}

impl ConsistencySnapshot {
    /// Total null cells across all columns.
    pub fn total_nulls(&self) -> usize {
        self.null_counts.values().sum()
    }

    /// True when the frame satisfies the post-cleaning invariant.
    pub fn is_clean(&self) -> bool {
        self.total_nulls() == 0 && self.duplicate_rows == 0
    }
}

impl fmt::Display for ConsistencySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nulls: {}", self.total_nulls())?;
        let with_nulls: Vec<String> = self
            .null_counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(name, count)| format!("{name}={count}"))
            .collect();
        if !with_nulls.is_empty() {
            write!(f, " ({})", with_nulls.join(", "))?;
        }
        write!(f, ", duplicate rows: {}", self.duplicate_rows)
    }
}
