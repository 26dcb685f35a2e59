//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use serde::Serialize;

use gerai_core::format::{format_currency, format_display_date, ABSENT};
use gerai_core::{CreateOutcome, InventoryRecord, ReplicationStatus};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// JSON shape of a create result
#[derive(Serialize)]
struct CreatedJson<'a> {
    status: &'static str,
    record: &'a InventoryRecord,
    replication: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    replication_error: Option<&'a str>,
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single record
    pub fn print_record(&self, record: &InventoryRecord) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", record.id);
                println!("Date:      {}", format_display_date(record.date));
                println!("Name:      {}", record.name);
                println!("Vendor:    {}", record.vendor);
                println!("Stock:     {}", record.stock_quantity);
                println!("Cost:      {}", format_currency(record.cost_price));
                println!("Price:     {}", format_currency(record.sell_price));
                println!(
                    "Image:     {}",
                    record.image_url.as_deref().unwrap_or(ABSENT)
                );
                if let Some(ref notes) = record.notes {
                    println!();
                    println!("── Notes ──");
                    println!("{}", notes);
                }
            }
            OutputFormat::Json => print_json(record),
            OutputFormat::Quiet => {
                println!("{}", record.id);
            }
        }
    }

    /// Print a list of records
    pub fn print_records(&self, records: &[InventoryRecord]) {
        match self.format {
            OutputFormat::Human => {
                if records.is_empty() {
                    println!("No records found.");
                    return;
                }
                for record in records {
                    println!(
                        "{} | {} | {} | {} | qty {} | {} / {}",
                        record.id.short(),
                        record.date.format("%d/%m/%Y"),
                        truncate(&record.name, 30),
                        truncate(&record.vendor, 20),
                        record.stock_quantity,
                        format_currency(record.cost_price),
                        format_currency(record.sell_price)
                    );
                }
                println!("\n{} record(s)", records.len());
            }
            OutputFormat::Json => print_json(&records),
            OutputFormat::Quiet => {
                for record in records {
                    println!("{}", record.id);
                }
            }
        }
    }

    /// Print the result of adding a record
    ///
    /// A replication failure is reported as a warning; the record itself
    /// was saved.
    pub fn print_created(&self, outcome: &CreateOutcome) {
        let record = &outcome.record;
        match self.format {
            OutputFormat::Human => {
                println!(
                    "✓ Saved record {} - {} ({} from {})",
                    record.id.short(),
                    record.name,
                    record.stock_quantity,
                    record.vendor
                );
                match &outcome.replication {
                    ReplicationStatus::Disabled => {}
                    ReplicationStatus::Delivered => println!("  Sent to sink."),
                    ReplicationStatus::Failed(reason) => {
                        eprintln!("⚠ Saved locally, but sending to the sink failed: {}", reason);
                    }
                }
            }
            OutputFormat::Json => {
                let replication_error = match &outcome.replication {
                    ReplicationStatus::Failed(reason) => Some(reason.as_str()),
                    _ => None,
                };
                print_json(&CreatedJson {
                    status: "success",
                    record,
                    replication: outcome.replication.label(),
                    replication_error,
                });
            }
            OutputFormat::Quiet => {
                println!("{}", record.id);
            }
        }
    }

    /// Print the vendor list
    pub fn print_vendors(&self, vendors: &[String]) {
        match self.format {
            OutputFormat::Human => {
                if vendors.is_empty() {
                    println!("No vendors registered.");
                    return;
                }
                for vendor in vendors {
                    println!("{}", vendor);
                }
                println!("\n{} vendor(s)", vendors.len());
            }
            OutputFormat::Json => print_json(&vendors),
            OutputFormat::Quiet => {
                for vendor in vendors {
                    println!("{}", vendor);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output as JSON: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
