//! Status command handler

use anyhow::Result;

use gerai_core::{Config, Inventory, Transport};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show<T: Transport>(inventory: &Inventory<T>, config: &Config, output: &Output) -> Result<()> {
    let settings = inventory.settings();
    let records = inventory.records();
    let total_stock: u64 = records
        .all()
        .iter()
        .map(|record| u64::from(record.stock_quantity))
        .sum();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "replication": {
                        "enabled": settings.sink().is_some(),
                        "sink_url": settings.sink(),
                        "timeout_secs": config.replication_timeout().as_secs()
                    },
                    "admin_mode": settings.admin_mode(),
                    "pin_set": settings.has_access_secret(),
                    "storage": {
                        "location": config.store_dir()
                    },
                    "counts": {
                        "records": records.len(),
                        "vendors": inventory.vendors().len(),
                        "stock_units": total_stock
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", records.len());
        }
        OutputFormat::Human => {
            println!("Gerai Status");
            println!("============");
            println!();
            println!("Replication:");
            match settings.sink() {
                Some(url) => {
                    println!("  Status: enabled");
                    println!("  Sink:   {}", url);
                }
                None => println!("  Status: disabled"),
            }
            println!();
            println!("Access:");
            println!(
                "  Admin mode: {}",
                if settings.admin_mode() { "on" } else { "off" }
            );
            println!(
                "  PIN:        {}",
                if settings.has_access_secret() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!();
            println!("Storage:");
            println!("  Location: {}", config.store_dir().display());
            println!();
            println!("Contents:");
            println!("  Records:     {}", records.len());
            println!("  Vendors:     {}", inventory.vendors().len());
            println!("  Stock units: {}", total_stock);
        }
    }

    Ok(())
}
