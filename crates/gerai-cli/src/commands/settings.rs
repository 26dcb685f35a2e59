//! Settings command handlers
//!
//! Every settings command passes through the access gate first.

use anyhow::{bail, Context, Result};

use gerai_core::replication::parse_sink_url;
use gerai_core::{AccessGate, Inventory, Transport};

use crate::output::{Output, OutputFormat};
use crate::prompt::read_pin;

/// Check the settings PIN, prompting for it when it was not given
pub fn unlock<T: Transport>(
    inventory: &Inventory<T>,
    pin: Option<String>,
    output: &Output,
) -> Result<()> {
    let gate = AccessGate::new(inventory.settings());
    if !gate.is_locked() {
        return Ok(());
    }

    let candidate = match pin {
        Some(pin) => Some(pin),
        None if output.should_prompt() => read_pin("Settings PIN")?,
        None => None,
    };

    match candidate {
        None => bail!("Settings are locked. Pass the PIN with --pin."),
        Some(pin) if gate.unlock(Some(&pin)) => Ok(()),
        Some(_) => bail!("Incorrect PIN."),
    }
}

/// Show current settings
pub fn show<T: Transport>(inventory: &Inventory<T>, output: &Output) -> Result<()> {
    let settings = inventory.settings();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "sink_url": settings.sink(),
                    "replication_enabled": settings.sink().is_some(),
                    "admin_mode": settings.admin_mode(),
                    "pin_set": settings.has_access_secret()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", settings.sink_url());
        }
        OutputFormat::Human => {
            println!("Settings:");
            println!(
                "  sink_url:   {}",
                settings.sink().unwrap_or("(not set, replication disabled)")
            );
            println!("  admin_mode: {}", on_off(settings.admin_mode()));
            println!(
                "  pin:        {}",
                if settings.has_access_secret() {
                    "set"
                } else {
                    "(not set)"
                }
            );
        }
    }

    Ok(())
}

/// Set or clear the replication sink
pub fn sink<T: Transport>(inventory: &mut Inventory<T>, url: &str, output: &Output) -> Result<()> {
    let url = url.trim();
    if url.is_empty() || url == "none" {
        inventory
            .settings_mut()
            .set_sink_url("")
            .context("Failed to save sink URL")?;
        output.success("Replication disabled");
        return Ok(());
    }

    parse_sink_url(url).with_context(|| format!("Not a usable sink URL: {}", url))?;
    inventory
        .settings_mut()
        .set_sink_url(url)
        .context("Failed to save sink URL")?;

    output.success(&format!("Sink URL set to {}", url));
    Ok(())
}

/// Turn admin mode on or off
pub fn admin<T: Transport>(inventory: &mut Inventory<T>, enabled: bool, output: &Output) -> Result<()> {
    inventory
        .settings_mut()
        .set_admin_mode(enabled)
        .context("Failed to save admin mode")?;

    output.success(&format!("Admin mode {}", on_off(enabled)));
    Ok(())
}

/// Set a new settings PIN
pub fn set_pin<T: Transport>(
    inventory: &mut Inventory<T>,
    pin: &str,
    confirm: &str,
    output: &Output,
) -> Result<()> {
    inventory.settings_mut().set_access_secret(pin, confirm)?;
    output.success("Settings PIN updated");
    Ok(())
}

/// Remove the settings PIN
pub fn clear_pin<T: Transport>(inventory: &mut Inventory<T>, output: &Output) -> Result<()> {
    if !inventory.settings().has_access_secret() {
        output.message("No settings PIN is set.");
        return Ok(());
    }

    inventory
        .settings_mut()
        .clear_access_secret()
        .context("Failed to remove settings PIN")?;

    output.success("Settings PIN removed");
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_unlocked_without_pin() {
        let inventory = test_support::inventory();
        unlock(&inventory, None, &quiet()).unwrap();
    }

    #[test]
    fn test_locked_settings_need_matching_pin() {
        let mut inventory = test_support::inventory();
        set_pin(&mut inventory, "2468", "2468", &quiet()).unwrap();

        assert!(unlock(&inventory, None, &quiet()).is_err());
        assert!(unlock(&inventory, Some("1357".to_string()), &quiet()).is_err());
        unlock(&inventory, Some("2468".to_string()), &quiet()).unwrap();
    }

    #[test]
    fn test_set_pin_rejects_mismatch() {
        let mut inventory = test_support::inventory();

        let err = set_pin(&mut inventory, "1234", "1243", &quiet()).unwrap_err();
        assert!(err.to_string().contains("does not match"));
        assert!(!inventory.settings().has_access_secret());
    }

    #[test]
    fn test_clear_pin_unlocks() {
        let mut inventory = test_support::inventory();
        set_pin(&mut inventory, "2468", "2468", &quiet()).unwrap();

        clear_pin(&mut inventory, &quiet()).unwrap();
        unlock(&inventory, None, &quiet()).unwrap();
    }

    #[test]
    fn test_sink_validates_and_disables() {
        let mut inventory = test_support::inventory();

        assert!(sink(&mut inventory, "ftp://example.com/drop", &quiet()).is_err());
        assert_eq!(inventory.settings().sink(), None);

        sink(&mut inventory, " https://sink.example/exec ", &quiet()).unwrap();
        assert_eq!(inventory.settings().sink(), Some("https://sink.example/exec"));

        sink(&mut inventory, "none", &quiet()).unwrap();
        assert_eq!(inventory.settings().sink(), None);
    }

    #[test]
    fn test_admin_toggle() {
        let mut inventory = test_support::inventory();

        admin(&mut inventory, true, &quiet()).unwrap();
        assert!(inventory.settings().admin_mode());
        admin(&mut inventory, false, &quiet()).unwrap();
        assert!(!inventory.settings().admin_mode());
    }
}
