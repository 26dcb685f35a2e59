//! Vendor registry
//!
//! A case-insensitively unique set of vendor names, kept sorted
//! (case-insensitive ascending). Adding a name that differs only in casing
//! from an existing one is a no-op; the first casing wins.

use std::cmp::Ordering;

use tracing::info;

use crate::storage::{keys, PersistentStore, StorageResult};

/// Sorted, persisted set of vendor names
pub struct VendorRegistry {
    vendors: Vec<String>,
    store: PersistentStore,
}

impl VendorRegistry {
    /// Load the registry, using `seed` when nothing valid is stored
    pub fn load(store: PersistentStore, seed: &[String]) -> Self {
        let stored: Vec<String> = store.load_json(keys::VENDORS, seed.to_vec());
        Self {
            vendors: normalize(stored),
            store,
        }
    }

    /// Add a vendor name
    ///
    /// The name is trimmed first. Returns `false` without writing when the
    /// name is empty or already present under any casing.
    pub fn add(&mut self, name: &str) -> StorageResult<bool> {
        let name = name.trim();
        if name.is_empty() || self.resolve(name).is_some() {
            return Ok(false);
        }

        self.vendors.push(name.to_string());
        self.vendors.sort_by(|a, b| compare(a, b));
        info!("Added vendor '{}'", name);

        self.store.save_json(keys::VENDORS, &self.vendors)?;
        Ok(true)
    }

    /// Registered casing for `name`, if any
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.vendors
            .iter()
            .find(|vendor| vendor.to_lowercase() == needle)
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// All vendor names in sorted order
    pub fn all(&self) -> &[String] {
        &self.vendors
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

fn compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Trim, drop blanks and case-insensitive duplicates, then sort
fn normalize(names: Vec<String>) -> Vec<String> {
    let mut vendors: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        let lower = name.to_lowercase();
        if !name.is_empty() && !vendors.iter().any(|v| v.to_lowercase() == lower) {
            vendors.push(name.to_string());
        }
    }
    vendors.sort_by(|a, b| compare(a, b));
    vendors
}
