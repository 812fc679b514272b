//! Warehouse schema definition.
//!
//! Creation is idempotent (`CREATE TABLE IF NOT EXISTS`); an existing schema
//! is never altered. The sale table declares foreign keys to customer and
//! product, but they are declarative only — SQLite does not enforce them
//! without `PRAGMA foreign_keys`, and the loader audits instead of
//! enforcing.

use rusqlite::Connection;

use crate::error::Result;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS customer (
    customer_id INTEGER PRIMARY KEY,
    name TEXT,
    region TEXT,
    join_date TEXT,
    loyalty_points INTEGER,
    customer_segment TEXT
);
CREATE TABLE IF NOT EXISTS product (
    product_id INTEGER PRIMARY KEY,
    product_name TEXT,
    category TEXT
);
CREATE TABLE IF NOT EXISTS sale (
    sale_id INTEGER PRIMARY KEY,
    customer_id INTEGER,
    product_id INTEGER,
    sale_amount REAL,
    sale_date TEXT,
    FOREIGN KEY (customer_id) REFERENCES customer (customer_id),
    FOREIGN KEY (product_id) REFERENCES product (product_id)
);
";

/// Create the three warehouse tables if they do not exist.
pub fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
