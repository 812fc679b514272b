//! Fixed source-to-schema column mappings, one per entity.
//!
//! Prepared extracts keep their source naming convention; the loader renames
//! and projects to the schema's column set through these tables. Columns the
//! mapping does not list are dropped by the projection.

/// Rename/projection table for one warehouse entity.
#[derive(Debug, Clone, Copy)]
pub struct EntityMapping {
    /// Target relational table name.
    pub table: &'static str,
    /// `(source column, schema column)` pairs, in schema column order.
    pub columns: &'static [(&'static str, &'static str)],
}

pub const CUSTOMER_MAPPING: EntityMapping = EntityMapping {
    table: "customer",
    columns: &[
        ("CustomerID", "customer_id"),
        ("Name", "name"),
        ("Region", "region"),
        ("JoinDate", "join_date"),
        ("LoyaltyPoints", "loyalty_points"),
        ("CustomerSegment", "customer_segment"),
    ],
};

pub const PRODUCT_MAPPING: EntityMapping = EntityMapping {
    table: "product",
    columns: &[
        ("productid", "product_id"),
        ("productname", "product_name"),
        ("category", "category"),
    ],
};

pub const SALE_MAPPING: EntityMapping = EntityMapping {
    table: "sale",
    columns: &[
        ("transactionid", "sale_id"),
        ("customerid", "customer_id"),
        ("productid", "product_id"),
        ("saleamount", "sale_amount"),
        ("saledate", "sale_date"),
    ],
};
