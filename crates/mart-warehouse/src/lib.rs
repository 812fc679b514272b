//! SQLite warehouse loader for prepared sales extracts.
//!
//! Defines the fixed customer/product/sale schema, and materializes the
//! prepared frames into it with full-reload semantics: one transaction
//! deletes all rows, reinserts everything through the fixed column
//! mappings, and commits once.

pub mod error;
pub mod loader;
pub mod mapping;
pub mod schema;

pub use error::{Result, WarehouseError};
pub use loader::{LoadReport, PreparedFrames, TableCounts, load_warehouse, table_counts};
pub use mapping::{CUSTOMER_MAPPING, EntityMapping, PRODUCT_MAPPING, SALE_MAPPING};
pub use schema::create_schema;
