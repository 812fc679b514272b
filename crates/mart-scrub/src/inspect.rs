//! Structural and statistical text summaries of a frame.

use polars::prelude::{AnyValue, DataFrame};

use crate::values::{any_to_f64, format_numeric, is_numeric_dtype};

/// One line per column: name, dtype, non-null count.
pub fn structural_summary(frame: &DataFrame) -> String {
    let mut out = format!("shape: ({}, {})\n", frame.height(), frame.width());
    for col in frame.get_columns() {
        let non_null = col.len() - col.null_count();
        out.push_str(&format!(
            "{:<24} {:<10} {} non-null\n",
            col.name().as_str(),
            col.dtype().to_string(),
            non_null
        ));
    }
    out
}

/// Count/mean/std/min/max per numeric column. Nulls are skipped; std is the
/// sample standard deviation.
pub fn statistical_summary(frame: &DataFrame) -> String {
    let mut out = format!(
        "{:<24} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
        "column", "count", "mean", "std", "min", "max"
    );
    for col in frame.get_columns() {
        if !is_numeric_dtype(col.dtype()) {
            continue;
        }
        let mut values = Vec::with_capacity(col.len());
        for idx in 0..col.len() {
            if let Some(v) = any_to_f64(col.get(idx).unwrap_or(AnyValue::Null)) {
                values.push(v);
            }
        }
        let stats = ColumnStats::from_values(&values);
        out.push_str(&format!(
            "{:<24} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            col.name().as_str(),
            stats.count,
            stats.mean.map(fmt_stat).unwrap_or_default(),
            stats.std.map(fmt_stat).unwrap_or_default(),
            stats.min.map(format_numeric).unwrap_or_default(),
            stats.max.map(format_numeric).unwrap_or_default(),
        ));
    }
    out
}

fn fmt_stat(v: f64) -> String {
    format!("{v:.4}")
}

#[derive(Debug, Clone, PartialEq)]
struct ColumnStats {
    count: usize,
    mean: Option<f64>,
    std: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl ColumnStats {
    fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                std: None,
                min: None,
                max: None,
            };
        }
        let sum: f64 = values.iter().sum();
        let mean = sum / count as f64;
        let std = if count > 1 {
            let variance: f64 =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            count,
            mean: Some(mean),
            std,
            min: Some(min),
            max: Some(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnStats;

    #[test]
    fn stats_over_known_values() {
        let stats = ColumnStats::from_values(&[2.0, 4.0, 6.0]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, Some(4.0));
        assert_eq!(stats.std, Some(2.0));
        assert_eq!(stats.min, Some(2.0));
        assert_eq!(stats.max, Some(6.0));
    }

    #[test]
    fn empty_column_has_no_stats() {
        let stats = ColumnStats::from_values(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, None);
    }
}
