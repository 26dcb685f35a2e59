//! Gerai CLI
//!
//! Command-line interface for Gerai - stall inventory tracking.

use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gerai_core::{Config, Inventory};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "gerai")]
#[command(about = "Gerai - Inventory tracking for a small retail stall")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage inventory records
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Manage vendors
    Vendor {
        #[command(subcommand)]
        command: Option<VendorCommands>,
    },
    /// Show or change settings (sink URL, admin mode, PIN)
    Settings {
        /// Settings PIN (prompted for when a PIN is set and this is omitted)
        #[arg(long)]
        pin: Option<String>,

        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (counts, replication, storage location)
    Status,
}

#[derive(Subcommand)]
enum RecordCommands {
    /// Add a new record
    #[command(alias = "create")]
    Add(AddRecordArgs),
    /// List all records, newest first
    #[command(alias = "ls")]
    List,
    /// Show record details
    Show {
        /// Record ID (full ID or the short ID from `record list`)
        id: String,
    },
    /// Delete a record (requires admin mode)
    #[command(alias = "rm")]
    Delete {
        /// Record ID (full ID or the short ID from `record list`)
        id: String,
    },
}

#[derive(Args)]
pub struct AddRecordArgs {
    /// Item name
    #[arg(short, long)]
    pub name: String,
    /// Vendor name (registered automatically if new)
    #[arg(short, long)]
    pub vendor: String,
    /// Units in stock
    #[arg(long = "qty", value_name = "QTY")]
    pub quantity: String,
    /// Unit cost price
    #[arg(long)]
    pub cost: Option<String>,
    /// Unit selling price
    #[arg(long)]
    pub sell: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
enum VendorCommands {
    /// List vendors
    #[command(alias = "ls")]
    List,
    /// Register a vendor
    Add {
        /// Vendor name
        name: String,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show,
    /// Set the replication sink URL ("none" or "" disables replication)
    Sink {
        /// Sink URL
        url: String,
    },
    /// Turn admin mode on or off
    Admin {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set the settings PIN
    SetPin {
        /// New PIN (digits only)
        pin: String,
        /// The same PIN again
        confirm: String,
    },
    /// Remove the settings PIN
    ClearPin,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(self) -> bool {
        matches!(self, Toggle::On)
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, replication_timeout_secs, vendor_seed)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands work without opening the store
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let mut inventory = Inventory::open(&config)?;

    match cli.command {
        Commands::Record { command } => match command {
            RecordCommands::Add(args) => commands::record::add(&mut inventory, args, &output).await,
            RecordCommands::List => commands::record::list(&inventory, &output),
            RecordCommands::Show { id } => commands::record::show(&inventory, &id, &output),
            RecordCommands::Delete { id } => commands::record::delete(&mut inventory, &id, &output),
        },
        Commands::Vendor { command } => match command {
            Some(VendorCommands::List) | None => commands::vendor::list(&inventory, &output),
            Some(VendorCommands::Add { name }) => {
                commands::vendor::add(&mut inventory, &name, &output)
            }
        },
        Commands::Settings { pin, command } => {
            handle_settings_command(command, pin, &mut inventory, &output)
        }
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&inventory, &config, &output),
    }
}

fn handle_settings_command<T: gerai_core::Transport>(
    command: Option<SettingsCommands>,
    pin: Option<String>,
    inventory: &mut Inventory<T>,
    output: &Output,
) -> Result<()> {
    commands::settings::unlock(inventory, pin, output)?;

    match command {
        Some(SettingsCommands::Show) | None => commands::settings::show(inventory, output),
        Some(SettingsCommands::Sink { url }) => commands::settings::sink(inventory, &url, output),
        Some(SettingsCommands::Admin { state }) => {
            commands::settings::admin(inventory, state.is_on(), output)
        }
        Some(SettingsCommands::SetPin { pin, confirm }) => {
            commands::settings::set_pin(inventory, &pin, &confirm, output)
        }
        Some(SettingsCommands::ClearPin) => commands::settings::clear_pin(inventory, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Set up file logging when GERAI_LOG is set
///
/// Logs never go to the terminal, so they cannot interleave with command output.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("GERAI_LOG") else {
        return;
    };

    let log_path = config.log_path();
    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!("gerai_core={},gerai_cli={}", log_level, log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
