//! Full pipeline run against a temporary data directory: raw CSVs in,
//! prepared CSVs and a populated warehouse out.

use mart_cli::cli::{EntityArg, PrepareArgs};
use mart_cli::commands::{run_check, run_load, run_prepare};
use mart_ingest::{DataPaths, Entity, read_raw, write_prepared};
use mart_warehouse::table_counts;
use polars::df;

fn seed_raw_extracts(paths: &DataPaths) {
    let mut customers = df!(
        "CustomerID" => &[1i64, 1, 2],
        "Name" => &["ann", "ann", "bob"],
        "Region" => &["east", "east", "west"],
        "JoinDate" => &["2024-01-01", "2024-01-01", "2024-02-01"],
        "LoyaltyPoints" => &[200i64, 200, 9000],
        "CustomerSegment" => &["new", "new", "vip"],
    )
    .unwrap();
    let mut products = df!(
        "ProductID" => &[10i64, 11],
        "ProductName" => &["Widget", "Gadget"],
        "Category" => &["Tools", "Toys"],
        "SubCategory" => &["Hand Tools", "Dolls"],
        "StockQuantity" => &[50i64, 75],
    )
    .unwrap();
    let mut sales = df!(
        "TransactionID" => &[100i64, 101],
        "CustomerID" => &[1i64, 2],
        "ProductID" => &[10i64, 11],
        "SaleAmount" => &[9.99f64, 19.99],
        "SaleDate" => &["2024-04-01", "2024-04-02"],
    )
    .unwrap();
    write_prepared(&mut customers, &paths.raw(Entity::Customers)).unwrap();
    write_prepared(&mut products, &paths.raw(Entity::Products)).unwrap();
    write_prepared(&mut sales, &paths.raw(Entity::Sales)).unwrap();
}

#[test]
fn prepare_then_load_fills_the_warehouse() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    seed_raw_extracts(&paths);

    run_check(&paths).unwrap();
    run_prepare(
        &paths,
        &PrepareArgs {
            entity: EntityArg::All,
            inspect: false,
        },
    )
    .unwrap();

    // Duplicate customer collapsed, out-of-range loyalty points removed.
    let prepared = read_raw(&paths.prepared(Entity::Customers)).unwrap();
    assert_eq!(prepared.height(), 1);

    run_load(&paths).unwrap();
    let counts = table_counts(&paths.warehouse_db()).unwrap();
    assert_eq!(counts.customers, 1);
    assert_eq!(counts.products, 2);
    assert_eq!(counts.sales, 2);
}

#[test]
fn prepare_fails_cleanly_on_missing_raw_extract() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    let result = run_prepare(
        &paths,
        &PrepareArgs {
            entity: EntityArg::Customers,
            inspect: false,
        },
    );
    assert!(result.is_err());
}
