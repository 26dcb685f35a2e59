//! Vendor command handlers

use anyhow::{bail, Context, Result};

use gerai_core::{Inventory, Transport};

use crate::output::Output;

/// List all vendors
pub fn list<T: Transport>(inventory: &Inventory<T>, output: &Output) -> Result<()> {
    output.print_vendors(inventory.vendors().all());
    Ok(())
}

/// Register a vendor
pub fn add<T: Transport>(inventory: &mut Inventory<T>, name: &str, output: &Output) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Vendor name must not be empty");
    }

    let added = inventory
        .add_vendor(name)
        .context("Failed to save vendor list")?;

    if added {
        output.success(&format!("Added vendor: {}", name.trim()));
    } else {
        let existing = inventory.vendors().resolve(name).unwrap_or(name);
        output.message(&format!("Vendor already registered: {}", existing));
    }

    Ok(())
}
