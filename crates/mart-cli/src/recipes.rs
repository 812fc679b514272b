//! Per-entity preparation recipes.
//!
//! Each recipe takes one raw frame through the scrubber: snapshot before,
//! clean, snapshot after. The after-cleaning snapshot is a hard
//! post-condition; a remaining null or duplicate stops the pipeline.

use mart_scrub::{CaseMode, FillValue, MissingPolicy, Phase, Result, Scrubber};
use polars::prelude::DataFrame;
use tracing::info;

/// Clean the customers extract: trim headers, dedupe, fill nulls with 0,
/// keep loyalty points in [0, 5000], uppercase the segment.
pub fn prepare_customers(frame: DataFrame) -> Result<DataFrame> {
    let mut scrubber = Scrubber::new(frame);
    let before = scrubber.consistency_snapshot(Phase::BeforeCleaning)?;
    info!(%before, "consistency before cleaning");
    scrubber.normalize_headers()?;
    scrubber.deduplicate()?;
    scrubber.handle_missing(&MissingPolicy::Fill(FillValue::Int(0)))?;
    scrubber.filter_numeric_range("LoyaltyPoints", 0.0, 5000.0)?;
    scrubber.normalize_text_case("CustomerSegment", CaseMode::Upper)?;
    let after = scrubber.consistency_snapshot(Phase::AfterCleaning)?;
    info!(%after, "consistency after cleaning");
    Ok(scrubber.into_frame())
}

/// Clean the products extract: snake-case headers, dedupe, fill nulls with
/// 0, keep stock quantity in [0, 5000], lowercase the subcategory.
pub fn prepare_products(frame: DataFrame) -> Result<DataFrame> {
    let mut scrubber = Scrubber::new(frame);
    let before = scrubber.consistency_snapshot(Phase::BeforeCleaning)?;
    info!(%before, "consistency before cleaning");
    scrubber.normalize_headers_snake()?;
    scrubber.deduplicate()?;
    scrubber.handle_missing(&MissingPolicy::Fill(FillValue::Int(0)))?;
    scrubber.filter_numeric_range("stockquantity", 0.0, 5000.0)?;
    scrubber.normalize_text_case("subcategory", CaseMode::Lower)?;
    let after = scrubber.consistency_snapshot(Phase::AfterCleaning)?;
    info!(%after, "consistency after cleaning");
    Ok(scrubber.into_frame())
}

/// Clean the sales extract: snake-case headers, dedupe, drop rows with any
/// null (a missing id or date cannot be repaired by a fill), derive the
/// standard datetime from the sale date.
pub fn prepare_sales(frame: DataFrame) -> Result<DataFrame> {
    let mut scrubber = Scrubber::new(frame);
    let before = scrubber.consistency_snapshot(Phase::BeforeCleaning)?;
    info!(%before, "consistency before cleaning");
    scrubber.normalize_headers_snake()?;
    scrubber.deduplicate()?;
    scrubber.handle_missing(&MissingPolicy::Drop)?;
    scrubber.derive_standard_datetime("saledate")?;
    let after = scrubber.consistency_snapshot(Phase::AfterCleaning)?;
    info!(%after, "consistency after cleaning");
    Ok(scrubber.into_frame())
}
