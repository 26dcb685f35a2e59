//! User settings
//!
//! Scalar settings kept in the persistent store, each under its own key and
//! written independently:
//!
//! - `sink_url`: replication destination, empty disables replication
//! - `admin_mode`: enables destructive actions such as record deletion
//! - `access_secret`: PIN guarding the settings, absent means unrestricted
//!
//! `Settings` only stores values. Enforcement lives with the callers:
//! the CLI checks `admin_mode` before deleting, and [`AccessGate`] compares
//! candidate PINs.

use thiserror::Error;
use tracing::info;

use crate::storage::{keys, PersistentStore, StorageError, StorageResult};

/// Shortest accepted access secret
pub const MIN_SECRET_LEN: usize = 4;

/// Reasons a new access secret is refused
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("PIN must be at least {} digits", MIN_SECRET_LEN)]
    TooShort,

    #[error("PIN may only contain digits")]
    NotNumeric,

    #[error("PIN confirmation does not match")]
    Mismatch,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Persisted scalar settings
pub struct Settings {
    sink_url: String,
    admin_mode: bool,
    access_secret: Option<String>,
    store: PersistentStore,
}

impl Settings {
    /// Load all settings, defaulting each one independently
    pub fn load(store: PersistentStore) -> Self {
        let sink_url = store
            .load_text(keys::SINK_URL)
            .map(|url| url.trim().to_string())
            .unwrap_or_default();
        let admin_mode = store.load_json(keys::ADMIN_MODE, false);
        let access_secret = store
            .load_text(keys::ACCESS_SECRET)
            .filter(|secret| !secret.is_empty());

        Self {
            sink_url,
            admin_mode,
            access_secret,
            store,
        }
    }

    /// Replication destination, empty when replication is disabled
    pub fn sink_url(&self) -> &str {
        &self.sink_url
    }

    /// Replication destination, `None` when replication is disabled
    pub fn sink(&self) -> Option<&str> {
        if self.sink_url.is_empty() {
            None
        } else {
            Some(&self.sink_url)
        }
    }

    pub fn set_sink_url(&mut self, url: &str) -> StorageResult<()> {
        self.sink_url = url.trim().to_string();
        self.store.save_text(keys::SINK_URL, &self.sink_url)?;
        info!(
            "Replication {}",
            if self.sink_url.is_empty() {
                "disabled"
            } else {
                "destination updated"
            }
        );
        Ok(())
    }

    pub fn admin_mode(&self) -> bool {
        self.admin_mode
    }

    pub fn set_admin_mode(&mut self, enabled: bool) -> StorageResult<()> {
        self.admin_mode = enabled;
        self.store.save_json(keys::ADMIN_MODE, &enabled)?;
        info!("Admin mode {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn access_secret(&self) -> Option<&str> {
        self.access_secret.as_deref()
    }

    pub fn has_access_secret(&self) -> bool {
        self.access_secret.is_some()
    }

    /// Store a new PIN after checking it against its confirmation
    pub fn set_access_secret(&mut self, secret: &str, confirm: &str) -> Result<(), SecretError> {
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(SecretError::TooShort);
        }
        if !secret.chars().all(|c| c.is_ascii_digit()) {
            return Err(SecretError::NotNumeric);
        }
        if secret != confirm {
            return Err(SecretError::Mismatch);
        }

        self.store.save_text(keys::ACCESS_SECRET, secret)?;
        self.access_secret = Some(secret.to_string());
        info!("Settings PIN updated");
        Ok(())
    }

    /// Remove the PIN, leaving settings unrestricted
    pub fn clear_access_secret(&mut self) -> StorageResult<()> {
        self.store.remove(keys::ACCESS_SECRET)?;
        self.access_secret = None;
        info!("Settings PIN removed");
        Ok(())
    }
}

/// Gate in front of the settings
///
/// Compares a candidate PIN by plain string equality against the stored one.
/// There is no hashing, lockout or rate limiting; the PIN only keeps casual
/// hands off a shared device.
pub struct AccessGate<'a> {
    settings: &'a Settings,
}

impl<'a> AccessGate<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Whether a PIN must be supplied
    pub fn is_locked(&self) -> bool {
        self.settings.has_access_secret()
    }

    /// Check a candidate; always passes when no PIN is stored
    pub fn unlock(&self, candidate: Option<&str>) -> bool {
        match self.settings.access_secret() {
            None => true,
            Some(secret) => candidate == Some(secret),
        }
    }
}
