//! Record command handlers

use anyhow::{bail, Context, Result};

use gerai_core::{Inventory, RecordForm, RecordId, RecordRepository, SubmitError, Transport};

use crate::output::Output;
use crate::prompt::confirm;
use crate::AddRecordArgs;

/// Validate and add a new record
pub async fn add<T: Transport>(
    inventory: &mut Inventory<T>,
    args: AddRecordArgs,
    output: &Output,
) -> Result<()> {
    let form = RecordForm {
        name: args.name,
        vendor: args.vendor,
        stock_quantity: args.quantity,
        cost_price: args.cost.unwrap_or_default(),
        sell_price: args.sell.unwrap_or_default(),
        image_url: args.image.unwrap_or_default(),
        notes: args.notes.unwrap_or_default(),
    };

    let outcome = match inventory.submit(&form).await {
        Ok(outcome) => outcome,
        Err(SubmitError::Validation(e)) => bail!("{}. Nothing was saved.", e),
        Err(SubmitError::Storage(e)) => {
            let hint = e.recovery_suggestion().unwrap_or_default();
            return Err(e).context(format!("Failed to save record. {}", hint));
        }
    };

    output.print_created(&outcome);
    Ok(())
}

/// List all records, newest first
pub fn list<T: Transport>(inventory: &Inventory<T>, output: &Output) -> Result<()> {
    output.print_records(inventory.records().all());
    Ok(())
}

/// Show one record
pub fn show<T: Transport>(inventory: &Inventory<T>, id: &str, output: &Output) -> Result<()> {
    let id = resolve_record_id(inventory.records(), id)?;
    let record = inventory
        .records()
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Record not found: {}", id))?;

    output.print_record(record);
    Ok(())
}

/// Delete a record; refused unless admin mode is on
pub fn delete<T: Transport>(inventory: &mut Inventory<T>, id: &str, output: &Output) -> Result<()> {
    if !inventory.settings().admin_mode() {
        bail!(
            "Deleting records requires admin mode.\n\
             Enable it with: gerai settings admin on"
        );
    }

    let Some(id) = find_record_id(inventory.records(), id)? else {
        output.message(&format!("No record matches '{}'; nothing to delete.", id.trim()));
        return Ok(());
    };

    if output.should_prompt() {
        if let Some(record) = inventory.records().get(&id) {
            println!("Delete record: {} - {}", record.id.short(), record.name);
        }
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    inventory
        .delete_record(&id)
        .context("Failed to delete record")?;

    output.success(&format!("Deleted record: {}", id));
    Ok(())
}

/// Resolve a full id or a short id (suffix) to a stored record id
fn resolve_record_id(records: &RecordRepository, input: &str) -> Result<RecordId> {
    find_record_id(records, input)?
        .ok_or_else(|| anyhow::anyhow!("No record found matching: {}", input.trim()))
}

/// Like [`resolve_record_id`], but no match is `None` rather than an error
fn find_record_id(records: &RecordRepository, input: &str) -> Result<Option<RecordId>> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Record ID must not be empty");
    }

    let exact = RecordId::from(input);
    if records.contains(&exact) {
        return Ok(Some(exact));
    }

    let matches = records.find_by_suffix(input);
    match matches.len() {
        0 => Ok(None),
        1 => Ok(Some(matches[0].id.clone())),
        _ => {
            eprintln!("Multiple records match '{}':", input);
            for record in &matches {
                eprintln!("  {} - {}", record.id, record.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
