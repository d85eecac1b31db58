//! Reference-table inventory command

use anyhow::Result;
use catalog_model::{CatalogContext, CurrentClass, TableId};
use catalog_store::DEPLOYED_VOLTAGES_KV;
use colored::Colorize;

/// List every table a full deployment expects, with load status
pub fn handle_tables(ctx: &CatalogContext) -> Result<()> {
    println!("{}", "Reference tables".bold());

    for id in expected_tables() {
        match ctx.table(id) {
            Ok(table) => println!("  {:<28} {:>4} rows", id.to_string(), table.len()),
            Err(_) => println!("  {:<28} {}", id.to_string(), "MISSING".yellow()),
        }
    }

    println!();
    println!(
        "  cable database: {} entries, terminations: {}, base products: {}",
        ctx.cables.len(),
        ctx.terminations.len(),
        ctx.products.len()
    );
    Ok(())
}

fn expected_tables() -> Vec<TableId> {
    let mut ids = Vec::new();
    for voltage_kv in DEPLOYED_VOLTAGES_KV {
        for current in [CurrentClass::A200, CurrentClass::A600] {
            ids.push(TableId::CableRange {
                voltage_kv,
                current,
            });
        }
    }
    ids.push(TableId::Conductor200);
    ids.push(TableId::CompressionLug600);
    ids.push(TableId::ShearBolt);
    ids
}
