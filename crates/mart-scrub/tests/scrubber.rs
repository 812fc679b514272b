//! Tests for the scrubber's cleaning operations.

use mart_scrub::{CaseMode, FillValue, MissingPolicy, Phase, ScrubError, Scrubber, ValueKind};
use polars::df;
use polars::prelude::{AnyValue, DataFrame};

fn sample() -> DataFrame {
    df!(
        "id" => &[1i64, 2, 3],
        "name" => &[Some(" Alice "), None, Some("carol")],
        "points" => &[Some(10i64), Some(20), None],
    )
    .unwrap()
}

#[test]
fn drop_missing_leaves_no_nulls() {
    let mut scrubber = Scrubber::new(sample());
    scrubber.handle_missing(&MissingPolicy::Drop).unwrap();
    let snapshot = scrubber.consistency_snapshot(Phase::BeforeCleaning).unwrap();
    assert_eq!(snapshot.total_nulls(), 0);
    assert_eq!(scrubber.frame().height(), 1);
}

#[test]
fn fill_replaces_every_null_across_columns() {
    let mut scrubber = Scrubber::new(sample());
    scrubber
        .handle_missing(&MissingPolicy::Fill(FillValue::Int(0)))
        .unwrap();
    let snapshot = scrubber.consistency_snapshot(Phase::BeforeCleaning).unwrap();
    assert_eq!(snapshot.total_nulls(), 0);
    // Numeric column keeps its kind; text column takes the textual fill.
    let points = scrubber.frame().column("points").unwrap();
    assert_eq!(points.get(2).unwrap(), AnyValue::Int64(0));
    let name = scrubber.frame().column("name").unwrap();
    assert_eq!(name.get(1).unwrap(), AnyValue::String("0"));
}

#[test]
fn keep_policy_is_a_no_op() {
    let mut scrubber = Scrubber::new(sample());
    scrubber.handle_missing(&MissingPolicy::Keep).unwrap();
    assert_eq!(scrubber.frame().height(), 3);
    let snapshot = scrubber.consistency_snapshot(Phase::BeforeCleaning).unwrap();
    assert_eq!(snapshot.total_nulls(), 2);
}

#[test]
fn deduplicate_keeps_first_occurrence() {
    let frame = df!(
        "id" => &[1i64, 1, 2],
        "name" => &["a", "a", "b"],
    )
    .unwrap();
    let mut scrubber = Scrubber::new(frame);
    scrubber.deduplicate().unwrap();
    assert_eq!(scrubber.frame().height(), 2);

    let once = scrubber.frame().clone();
    scrubber.deduplicate().unwrap();
    assert!(scrubber.frame().equals(&once));
}

#[test]
fn filter_range_excludes_nulls_and_outliers() {
    let mut scrubber = Scrubber::new(sample());
    scrubber.filter_numeric_range("points", 0.0, 15.0).unwrap();
    assert_eq!(scrubber.frame().height(), 1);
    let id = scrubber.frame().column("id").unwrap();
    assert_eq!(id.get(0).unwrap(), AnyValue::Int64(1));
}

#[test]
fn filter_range_is_idempotent() {
    let mut scrubber = Scrubber::new(sample());
    scrubber.filter_numeric_range("points", 0.0, 25.0).unwrap();
    let once = scrubber.frame().clone();
    scrubber.filter_numeric_range("points", 0.0, 25.0).unwrap();
    assert!(scrubber.frame().equals(&once));
}

#[test]
fn normalize_upper_trims_and_is_idempotent() {
    let mut scrubber = Scrubber::new(sample());
    scrubber
        .normalize_text_case("name", CaseMode::Upper)
        .unwrap();
    let name = scrubber.frame().column("name").unwrap();
    assert_eq!(name.get(0).unwrap(), AnyValue::String("ALICE"));
    // Nulls stringify to the empty string.
    assert_eq!(name.get(1).unwrap(), AnyValue::String(""));

    let once = scrubber.frame().clone();
    scrubber
        .normalize_text_case("name", CaseMode::Upper)
        .unwrap();
    assert!(scrubber.frame().equals(&once));
}

#[test]
fn cast_column_to_float_and_text() {
    let frame = df!("amount" => &["1.5", "2", "3.25"]).unwrap();
    let mut scrubber = Scrubber::new(frame);
    scrubber.cast_column("amount", ValueKind::Float).unwrap();
    let amount = scrubber.frame().column("amount").unwrap();
    assert_eq!(amount.get(0).unwrap(), AnyValue::Float64(1.5));

    scrubber.cast_column("amount", ValueKind::Text).unwrap();
    let amount = scrubber.frame().column("amount").unwrap();
    assert_eq!(amount.get(2).unwrap(), AnyValue::String("3.25"));
}

#[test]
fn cast_fails_on_unconvertible_value() {
    let frame = df!("amount" => &["1.5", "abc"]).unwrap();
    let mut scrubber = Scrubber::new(frame.clone());
    let error = scrubber.cast_column("amount", ValueKind::Float).unwrap_err();
    assert!(matches!(error, ScrubError::Parse { .. }));
    // The whole operation failed; nothing was coerced to null.
    assert!(scrubber.frame().equals(&frame));
}

#[test]
fn cast_unknown_column_fails() {
    let mut scrubber = Scrubber::new(sample());
    let error = scrubber.cast_column("missing", ValueKind::Int).unwrap_err();
    assert!(matches!(error, ScrubError::ColumnNotFound { .. }));
}

#[test]
fn drop_columns_is_all_or_nothing() {
    let mut scrubber = Scrubber::new(sample());
    let error = scrubber.drop_columns(&["name", "missing"]).unwrap_err();
    assert!(matches!(error, ScrubError::ColumnNotFound { .. }));
    // Nothing was removed.
    assert!(scrubber.frame().column("name").is_ok());

    scrubber.drop_columns(&["name"]).unwrap();
    assert!(scrubber.frame().column("name").is_err());
}

#[test]
fn drop_columns_tolerates_repeated_names() {
    let mut scrubber = Scrubber::new(sample());
    let width = scrubber.frame().width();
    scrubber.drop_columns(&["name", "name"]).unwrap();
    assert!(scrubber.frame().column("name").is_err());
    assert_eq!(scrubber.frame().width(), width - 1);
}

#[test]
fn rename_roundtrip_restores_names_and_values() {
    let original = sample();
    let mut scrubber = Scrubber::new(original.clone());
    scrubber
        .rename_columns(&[("name", "customer_name"), ("points", "loyalty")])
        .unwrap();
    assert!(scrubber.frame().column("customer_name").is_ok());
    scrubber
        .rename_columns(&[("customer_name", "name"), ("loyalty", "points")])
        .unwrap();
    assert!(scrubber.frame().equals_missing(&original));
}

#[test]
fn rename_validates_before_applying() {
    let mut scrubber = Scrubber::new(sample());
    let error = scrubber
        .rename_columns(&[("name", "n"), ("missing", "m")])
        .unwrap_err();
    assert!(matches!(error, ScrubError::ColumnNotFound { .. }));
    assert!(scrubber.frame().column("name").is_ok());
}

#[test]
fn reorder_requires_a_permutation() {
    let mut scrubber = Scrubber::new(sample());
    let error = scrubber.reorder_columns(&["points", "id"]).unwrap_err();
    assert!(matches!(error, ScrubError::NotAPermutation { .. }));

    scrubber
        .reorder_columns(&["points", "name", "id"])
        .unwrap();
    let names: Vec<String> = scrubber
        .frame()
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, vec!["points", "name", "id"]);
}

#[test]
fn select_columns_projects_and_drops_the_rest() {
    let mut scrubber = Scrubber::new(sample());
    scrubber.select_columns(&["id", "points"]).unwrap();
    assert_eq!(scrubber.frame().width(), 2);
    assert!(scrubber.frame().column("name").is_err());
}

#[test]
fn derive_standard_datetime_writes_iso_text() {
    let frame = df!(
        "saledate" => &[Some("2024-01-15"), Some("01/20/2024 08:30"), None],
    )
    .unwrap();
    let mut scrubber = Scrubber::new(frame);
    scrubber.derive_standard_datetime("saledate").unwrap();
    let derived = scrubber.frame().column("StandardDateTime").unwrap();
    assert_eq!(
        derived.get(0).unwrap(),
        AnyValue::String("2024-01-15T00:00:00")
    );
    assert_eq!(
        derived.get(1).unwrap(),
        AnyValue::String("2024-01-20T08:30:00")
    );
    assert_eq!(derived.get(2).unwrap(), AnyValue::Null);
}

#[test]
fn derive_standard_datetime_fails_on_garbage() {
    let frame = df!("saledate" => &["not a date"]).unwrap();
    let mut scrubber = Scrubber::new(frame);
    let error = scrubber.derive_standard_datetime("saledate").unwrap_err();
    assert!(matches!(error, ScrubError::Parse { .. }));
}

#[test]
fn normalize_headers_trims_whitespace() {
    let frame = df!(" Name " => &["a"], "Region" => &["b"]).unwrap();
    let mut scrubber = Scrubber::new(frame);
    scrubber.normalize_headers().unwrap();
    assert!(scrubber.frame().column("Name").is_ok());
}

#[test]
fn snake_headers_lowercase_and_join() {
    let frame = df!("Product ID" => &[1i64], "Category" => &["x"]).unwrap();
    let mut scrubber = Scrubber::new(frame);
    scrubber.normalize_headers_snake().unwrap();
    assert!(scrubber.frame().column("product_id").is_ok());
    assert!(scrubber.frame().column("category").is_ok());
}

#[test]
fn inspect_reports_shape_and_numeric_stats() {
    let scrubber = Scrubber::new(sample());
    let (structure, stats) = scrubber.inspect();
    assert!(structure.starts_with("shape: (3, 3)"));
    assert!(structure.contains("name"));
    assert!(stats.contains("points"));
    assert!(!stats.contains("name "));
}
