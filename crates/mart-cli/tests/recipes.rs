//! End-to-end checks for the per-entity preparation recipes.

use mart_cli::recipes::{prepare_customers, prepare_products, prepare_sales};
use polars::df;
use polars::prelude::AnyValue;

#[test]
fn customers_recipe_cleans_a_messy_extract() {
    let raw = df!(
        " CustomerID " => &[Some(1i64), Some(1), Some(2), Some(3), Some(4)],
        "Name" => &[Some("ann"), Some("ann"), None, Some("cal"), Some("dee")],
        "LoyaltyPoints" => &[Some(200i64), Some(200), Some(-5), Some(7000), Some(150)],
        "CustomerSegment" => &[Some("new"), Some("new"), Some("vip"), Some("vip"), Some("loyal")],
    )
    .unwrap();

    let prepared = prepare_customers(raw).unwrap();

    // Header trimmed, duplicate row collapsed, out-of-range points removed.
    assert!(prepared.column("CustomerID").is_ok());
    assert_eq!(prepared.height(), 2);

    let points = prepared.column("LoyaltyPoints").unwrap();
    for idx in 0..prepared.height() {
        match points.get(idx).unwrap() {
            AnyValue::Int64(v) => assert!((0..=5000).contains(&v)),
            other => panic!("unexpected loyalty value: {other:?}"),
        }
    }

    let segments = prepared.column("CustomerSegment").unwrap();
    assert_eq!(segments.get(0).unwrap(), AnyValue::String("NEW"));
    assert_eq!(segments.get(1).unwrap(), AnyValue::String("LOYAL"));
}

#[test]
fn customers_recipe_fills_missing_values_with_zero() {
    let raw = df!(
        "CustomerID" => &[1i64, 2],
        "LoyaltyPoints" => &[Some(100i64), None],
        "CustomerSegment" => &["new", "vip"],
    )
    .unwrap();

    let prepared = prepare_customers(raw).unwrap();
    assert_eq!(prepared.height(), 2);
    let points = prepared.column("LoyaltyPoints").unwrap();
    assert_eq!(points.null_count(), 0);
    assert_eq!(points.get(1).unwrap(), AnyValue::Int64(0));
}

#[test]
fn products_recipe_snakes_headers_and_bounds_stock() {
    let raw = df!(
        "ProductID" => &[10i64, 10, 11, 12],
        "ProductName" => &["Widget", "Widget", "Gadget", "Gizmo"],
        "SubCategory" => &["HAND Tools", "HAND Tools", "Toys", "Toys"],
        "StockQuantity" => &[Some(50i64), Some(50), Some(6000), None],
    )
    .unwrap();

    let prepared = prepare_products(raw).unwrap();

    let names: Vec<String> = prepared
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(
        names,
        vec!["productid", "productname", "subcategory", "stockquantity"]
    );

    // Duplicate collapsed, 6000 filtered out, null filled with 0 and kept.
    assert_eq!(prepared.height(), 2);
    let subcategory = prepared.column("subcategory").unwrap();
    assert_eq!(subcategory.get(0).unwrap(), AnyValue::String("hand tools"));
    let stock = prepared.column("stockquantity").unwrap();
    assert_eq!(stock.get(1).unwrap(), AnyValue::Int64(0));
}

#[test]
fn sales_recipe_drops_incomplete_rows_and_derives_datetime() {
    let raw = df!(
        "TransactionID" => &[Some(1i64), Some(1), Some(2), Some(3)],
        "CustomerID" => &[Some(7i64), Some(7), None, Some(8)],
        "SaleAmount" => &[9.99f64, 9.99, 5.0, 12.5],
        "SaleDate" => &["2024-04-01", "2024-04-01", "2024-04-02", "04/03/2024"],
    )
    .unwrap();

    let prepared = prepare_sales(raw).unwrap();

    // Duplicate collapsed and the null customer row dropped.
    assert_eq!(prepared.height(), 2);
    let derived = prepared.column("StandardDateTime").unwrap();
    assert_eq!(
        derived.get(0).unwrap(),
        AnyValue::String("2024-04-01T00:00:00")
    );
    assert_eq!(
        derived.get(1).unwrap(),
        AnyValue::String("2024-04-03T00:00:00")
    );
}

#[test]
fn sales_recipe_rejects_unparseable_dates() {
    let raw = df!(
        "TransactionID" => &[1i64],
        "SaleDate" => &["not a date"],
    )
    .unwrap();
    assert!(prepare_sales(raw).is_err());
}
