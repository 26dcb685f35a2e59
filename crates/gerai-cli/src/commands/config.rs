//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use gerai_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "log_file": config.log_file,
                    "replication_timeout_secs": config.replication_timeout().as_secs(),
                    "vendor_seed": config.vendor_seed()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:                 {}", config.data_dir.display());
            println!(
                "  log_file:                 {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!(
                "  replication_timeout_secs: {}",
                config.replication_timeout().as_secs()
            );
            println!(
                "  vendor_seed:              {}",
                config.vendor_seed().join(", ")
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    let mut config = Config::load_from_path(&save_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.trim().is_empty() {
                bail!("data_dir must not be empty");
            }
            config.data_dir = Path::new(value.trim()).to_path_buf();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "replication_timeout_secs" => {
            config.replication_timeout_secs = value
                .trim()
                .parse()
                .context("Invalid value for replication_timeout_secs. Use a whole number of seconds.")?;
        }
        "vendor_seed" => {
            let seed: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            if seed.is_empty() {
                bail!("vendor_seed needs at least one vendor name (comma-separated)");
            }
            config.vendor_seed = seed;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, log_file, replication_timeout_secs, vendor_seed",
                key
            );
        }
    }

    Ok(())
}
