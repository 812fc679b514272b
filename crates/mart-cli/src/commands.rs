//! Command implementations: setup check, preparation, warehouse load.

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use tracing::info_span;

use mart_ingest::{DataPaths, Entity, read_raw, read_raw_lenient, write_prepared};
use mart_scrub::Scrubber;
use mart_warehouse::{LoadReport, PreparedFrames, load_warehouse};

use crate::cli::{EntityArg, PrepareArgs};
use crate::recipes;

/// Lenient setup verification: report the shape of each raw extract,
/// treating missing files as empty.
pub fn run_check(paths: &DataPaths) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Extract", "Rows", "Columns"]);
    apply_table_style(&mut table);
    for entity in Entity::ALL {
        let frame = read_raw_lenient(&paths.raw(entity));
        table.add_row(vec![
            entity.name().to_string(),
            frame.height().to_string(),
            frame.width().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Prepare the selected extract, or all three in order.
pub fn run_prepare(paths: &DataPaths, args: &PrepareArgs) -> Result<()> {
    let entities: &[Entity] = match args.entity {
        EntityArg::Customers => &[Entity::Customers],
        EntityArg::Products => &[Entity::Products],
        EntityArg::Sales => &[Entity::Sales],
        EntityArg::All => &Entity::ALL,
    };
    for entity in entities {
        prepare_entity(paths, *entity, args.inspect)?;
    }
    Ok(())
}

fn prepare_entity(paths: &DataPaths, entity: Entity, inspect: bool) -> Result<()> {
    let span = info_span!("prepare", entity = entity.name());
    let _guard = span.enter();
    let raw = read_raw(&paths.raw(entity))
        .with_context(|| format!("read raw {} extract", entity.name()))?;
    let mut prepared = match entity {
        Entity::Customers => recipes::prepare_customers(raw),
        Entity::Products => recipes::prepare_products(raw),
        Entity::Sales => recipes::prepare_sales(raw),
    }
    .with_context(|| format!("clean {} extract", entity.name()))?;
    if inspect {
        let (structure, stats) = Scrubber::new(prepared.clone()).inspect();
        println!("{structure}");
        println!("{stats}");
    }
    write_prepared(&mut prepared, &paths.prepared(entity))
        .with_context(|| format!("write prepared {} extract", entity.name()))?;
    Ok(())
}

/// Full-reload the warehouse from the prepared extracts and print the
/// resulting row counts.
pub fn run_load(paths: &DataPaths) -> Result<()> {
    let span = info_span!("load");
    let _guard = span.enter();
    let frames = PreparedFrames {
        customers: read_raw(&paths.prepared(Entity::Customers))
            .context("read prepared customers extract")?,
        products: read_raw(&paths.prepared(Entity::Products))
            .context("read prepared products extract")?,
        sales: read_raw(&paths.prepared(Entity::Sales)).context("read prepared sales extract")?,
    };
    let report =
        load_warehouse(&paths.warehouse_db(), &frames).context("load warehouse")?;
    print_load_summary(&report);
    Ok(())
}

fn print_load_summary(report: &LoadReport) {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Rows"]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.add_row(vec!["customer".to_string(), report.customers.to_string()]);
    table.add_row(vec!["product".to_string(), report.products.to_string()]);
    table.add_row(vec!["sale".to_string(), report.sales.to_string()]);
    println!("{table}");
    if report.orphan_customer_refs > 0 || report.orphan_product_refs > 0 {
        println!(
            "warning: {} sale rows reference a missing customer, {} a missing product",
            report.orphan_customer_refs, report.orphan_product_refs
        );
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
