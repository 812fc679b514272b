//! Full-reload loader: delete all rows, reinsert from the prepared frames,
//! commit once.
//!
//! The delete and all three inserts run inside a single transaction, so a
//! failure at any point rolls back to the pre-load state. The connection is
//! scoped to the call and dropped on every exit path.

use std::path::Path;

use polars::prelude::{AnyValue, DataFrame};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params_from_iter};
use tracing::{info, warn};

use crate::error::{Result, WarehouseError};
use crate::mapping::{CUSTOMER_MAPPING, EntityMapping, PRODUCT_MAPPING, SALE_MAPPING};
use crate::schema::create_schema;

/// The three prepared frames a load consumes.
#[derive(Debug, Clone)]
pub struct PreparedFrames {
    pub customers: DataFrame,
    pub products: DataFrame,
    pub sales: DataFrame,
}

/// Row counts written by a load, plus the referential audit result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub customers: usize,
    pub products: usize,
    pub sales: usize,
    /// Sale rows whose customer_id has no matching customer.
    pub orphan_customer_refs: usize,
    /// Sale rows whose product_id has no matching product.
    pub orphan_product_refs: usize,
}

/// Current row counts of the three warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCounts {
    pub customers: usize,
    pub products: usize,
    pub sales: usize,
}

/// Replace the warehouse contents wholesale with the prepared frames.
pub fn load_warehouse(db_path: &Path, frames: &PreparedFrames) -> Result<LoadReport> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut conn = Connection::open(db_path)?;
    create_schema(&conn)?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM customer", [])?;
    tx.execute("DELETE FROM product", [])?;
    tx.execute("DELETE FROM sale", [])?;

    let customers = insert_frame(&tx, &CUSTOMER_MAPPING, &frames.customers)?;
    let products = insert_frame(&tx, &PRODUCT_MAPPING, &frames.products)?;
    let sales = insert_frame(&tx, &SALE_MAPPING, &frames.sales)?;

    let (orphan_customer_refs, orphan_product_refs) = audit_references(&tx)?;
    tx.commit()?;

    info!(customers, products, sales, "warehouse load committed");
    Ok(LoadReport {
        customers,
        products,
        sales,
        orphan_customer_refs,
        orphan_product_refs,
    })
}

/// Read back the row counts of the three tables.
pub fn table_counts(db_path: &Path) -> Result<TableCounts> {
    let conn = Connection::open(db_path)?;
    Ok(TableCounts {
        customers: count_rows(&conn, "customer")?,
        products: count_rows(&conn, "product")?,
        sales: count_rows(&conn, "sale")?,
    })
}

fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count as usize)
}

/// Rename, project, and bulk-insert one prepared frame through its fixed
/// entity mapping. Source columns the mapping does not list are dropped.
fn insert_frame(conn: &Connection, mapping: &EntityMapping, frame: &DataFrame) -> Result<usize> {
    for (source, _) in mapping.columns {
        if frame.column(source).is_err() {
            return Err(WarehouseError::MissingColumn {
                table: mapping.table.to_string(),
                column: (*source).to_string(),
            });
        }
    }
    let targets: Vec<&str> = mapping.columns.iter().map(|(_, target)| *target).collect();
    let placeholders: Vec<String> = (1..=targets.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        mapping.table,
        targets.join(", "),
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare(&sql)?;
    for idx in 0..frame.height() {
        let mut params = Vec::with_capacity(mapping.columns.len());
        for (source, _) in mapping.columns {
            let value = frame.column(source)?.get(idx).unwrap_or(AnyValue::Null);
            params.push(to_sql_value(value));
        }
        stmt.execute(params_from_iter(params))?;
    }
    Ok(frame.height())
}

fn to_sql_value(value: AnyValue<'_>) -> SqlValue {
    match value {
        AnyValue::Null => SqlValue::Null,
        AnyValue::Int8(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::Int16(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::Int32(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::Int64(v) => SqlValue::Integer(v),
        AnyValue::UInt8(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::UInt16(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::UInt32(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v)
            .map(SqlValue::Integer)
            .unwrap_or(SqlValue::Null),
        AnyValue::Float32(v) => SqlValue::Real(f64::from(v)),
        AnyValue::Float64(v) => SqlValue::Real(v),
        AnyValue::Boolean(v) => SqlValue::Integer(i64::from(v)),
        AnyValue::String(v) => SqlValue::Text(v.to_string()),
        AnyValue::StringOwned(v) => SqlValue::Text(v.to_string()),
        other => SqlValue::Text(other.to_string()),
    }
}

/// Count sale rows whose references have no parent. The schema's foreign
/// keys are declarative only; orphans load successfully and are reported
/// as warnings rather than rejected.
fn audit_references(conn: &Connection) -> Result<(usize, usize)> {
    let orphan_customers: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sale s \
         LEFT JOIN customer c ON s.customer_id = c.customer_id \
         WHERE c.customer_id IS NULL",
        [],
        |row| row.get(0),
    )?;
    let orphan_products: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sale s \
         LEFT JOIN product p ON s.product_id = p.product_id \
         WHERE p.product_id IS NULL",
        [],
        |row| row.get(0),
    )?;
    if orphan_customers > 0 || orphan_products > 0 {
        warn!(
            orphan_customers,
            orphan_products, "sale rows reference missing customers or products"
        );
    }
    Ok((orphan_customers as usize, orphan_products as usize))
}
