//! Unified inventory interface
//!
//! `Inventory` owns one handle to each persisted entity and coordinates the
//! create flow:
//!
//! 1. Adopt the registered casing of the draft's vendor, if known
//! 2. Assign identity, insert at the front and persist the collection
//! 3. Register the vendor when it is new
//! 4. If a sink URL is configured, make one replication attempt
//!
//! A record that fails to persist never registers its vendor.
//!
//! The local write is the durability contract. Replication is advisory and
//! reported separately; its failure never rolls back the stored record.
//!
//! ## Usage
//!
//! ```ignore
//! let mut inventory = Inventory::open(&config)?;
//!
//! let outcome = inventory.submit(&form).await?;
//! if let ReplicationStatus::Failed(reason) = &outcome.replication {
//!     eprintln!("Saved locally, sink failed: {}", reason);
//! }
//! ```

use anyhow::{Context, Result};
use thiserror::Error;

use crate::config::Config;
use crate::form::{RecordForm, ValidationError};
use crate::models::{InventoryRecord, RecordDraft, RecordId};
use crate::replication::{HttpTransport, ReplicationClient, Transport};
use crate::repository::RecordRepository;
use crate::settings::Settings;
use crate::storage::{PersistentStore, StorageError, StorageResult};
use crate::vendors::VendorRegistry;

/// Why a submission was rejected
#[derive(Error, Debug)]
pub enum SubmitError {
    /// Rejected before any mutation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The record could not be written locally
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Replication result as reported next to a successful create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationStatus {
    /// No sink configured, nothing was sent
    Disabled,
    /// Handed to the transport without a fault
    Delivered,
    /// Transport fault; the record is still stored locally
    Failed(String),
}

impl ReplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReplicationStatus::Disabled => "disabled",
            ReplicationStatus::Delivered => "delivered",
            ReplicationStatus::Failed(_) => "failed",
        }
    }
}

/// Combined result of creating a record
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    /// The stored record
    pub record: InventoryRecord,
    /// What happened on the replication side
    pub replication: ReplicationStatus,
}

/// Records, vendors and settings behind one handle
pub struct Inventory<T> {
    records: RecordRepository,
    vendors: VendorRegistry,
    settings: Settings,
    replicator: ReplicationClient<T>,
}

impl Inventory<HttpTransport> {
    /// Open the file-backed inventory with an HTTP replication client
    pub fn open(config: &Config) -> Result<Self> {
        let store = PersistentStore::open(config).context("Failed to open persistent store")?;
        let transport = HttpTransport::new(config.replication_timeout())
            .context("Failed to build HTTP transport")?;
        let replicator = ReplicationClient::new(transport, config.replication_timeout());
        Ok(Self::with_store(store, &config.vendor_seed(), replicator))
    }
}

impl<T: Transport> Inventory<T> {
    /// Load every entity from `store`
    pub fn with_store(
        store: PersistentStore,
        vendor_seed: &[String],
        replicator: ReplicationClient<T>,
    ) -> Self {
        Self {
            records: RecordRepository::load(store.clone()),
            vendors: VendorRegistry::load(store.clone(), vendor_seed),
            settings: Settings::load(store),
            replicator,
        }
    }

    // ==================== Record Operations ====================

    /// Validate a form and create the record it describes
    pub async fn submit(&mut self, form: &RecordForm) -> Result<CreateOutcome, SubmitError> {
        let draft = form.validate()?;
        Ok(self.add_record(draft).await?)
    }

    /// Store a record, then replicate it when a sink is configured
    pub async fn add_record(&mut self, mut draft: RecordDraft) -> StorageResult<CreateOutcome> {
        draft.vendor = match self.vendors.resolve(&draft.vendor) {
            Some(canonical) => canonical.to_string(),
            None => draft.vendor.trim().to_string(),
        };

        let record = self.records.create(draft)?;
        self.vendors.add(&record.vendor)?;

        let replication = match self.settings.sink() {
            None => ReplicationStatus::Disabled,
            Some(url) => {
                let outcome = self.replicator.send(&record, url).await;
                if outcome.delivered_to_transport {
                    ReplicationStatus::Delivered
                } else {
                    ReplicationStatus::Failed(outcome.fault.unwrap_or_default())
                }
            }
        };

        Ok(CreateOutcome {
            record,
            replication,
        })
    }

    /// Delete a record; unknown ids are a no-op returning `false`
    pub fn delete_record(&mut self, id: &RecordId) -> StorageResult<bool> {
        self.records.delete(id)
    }

    pub fn records(&self) -> &RecordRepository {
        &self.records
    }

    // ==================== Vendor Operations ====================

    /// Register a vendor; returns whether it was new
    pub fn add_vendor(&mut self, name: &str) -> StorageResult<bool> {
        self.vendors.add(name)
    }

    pub fn vendors(&self) -> &VendorRegistry {
        &self.vendors
    }

    // ==================== Settings ====================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replication::client::tests::{RecordingTransport, UnreachableTransport};
    use crate::storage::{keys, FileStore, KeyValueStore, MemoryStore};
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn seed() -> Vec<String> {
        vec!["Pak Abu".to_string(), "Kak Ani".to_string()]
    }

    fn open_inventory<T: Transport>(store: PersistentStore, transport: T) -> Inventory<T> {
        Inventory::with_store(
            store,
            &seed(),
            ReplicationClient::new(transport, Duration::from_secs(1)),
        )
    }

    fn nasi_lemak() -> RecordDraft {
        RecordDraft::new("Nasi Lemak", "Pak Abu", 20).with_prices(Some(2.5), Some(4.0))
    }

    #[tokio::test]
    async fn test_create_without_sink_sends_nothing() {
        let transport = RecordingTransport::default();
        let mut inventory = open_inventory(PersistentStore::in_memory(), transport.clone());
        let before = inventory.records().len();

        let outcome = inventory.add_record(nasi_lemak()).await.unwrap();

        assert_eq!(outcome.replication, ReplicationStatus::Disabled);
        assert_eq!(inventory.records().len(), before + 1);
        assert_eq!(inventory.records().all()[0], outcome.record);
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_create_with_sink_replicates_once() {
        let transport = RecordingTransport::default();
        let mut inventory = open_inventory(PersistentStore::in_memory(), transport.clone());
        inventory
            .settings_mut()
            .set_sink_url("https://sink.example/exec")
            .unwrap();

        let outcome = inventory.add_record(nasi_lemak()).await.unwrap();

        assert_eq!(outcome.replication, ReplicationStatus::Delivered);
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_replication_failure_keeps_local_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = PersistentStore::new(FileStore::open(temp_dir.path()).unwrap());
        let mut inventory = open_inventory(store, UnreachableTransport);
        inventory
            .settings_mut()
            .set_sink_url("http://unreachable.invalid/exec")
            .unwrap();

        let outcome = inventory.add_record(nasi_lemak()).await.unwrap();

        assert!(matches!(outcome.replication, ReplicationStatus::Failed(_)));
        assert_eq!(inventory.records().all()[0], outcome.record);

        // Still there after a restart
        let reopened = PersistentStore::new(FileStore::open(temp_dir.path()).unwrap());
        let repo = RecordRepository::load(reopened);
        assert_eq!(repo.all(), &[outcome.record]);
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_form_without_mutation() {
        let store = PersistentStore::in_memory();
        let mut inventory = open_inventory(store.clone(), RecordingTransport::default());

        let form = RecordForm {
            name: "Kuih".to_string(),
            vendor: "Orang Baru".to_string(),
            stock_quantity: "-3".to_string(),
            ..RecordForm::default()
        };
        let err = inventory.submit(&form).await.unwrap_err();

        assert!(matches!(err, SubmitError::Validation(_)));
        assert!(inventory.records().is_empty());
        assert!(!inventory.vendors().contains("Orang Baru"));
        assert!(store.load_text(keys::INVENTORY_ITEMS).is_none());
    }

    #[tokio::test]
    async fn test_new_vendor_is_registered_with_first_casing() {
        let mut inventory = open_inventory(PersistentStore::in_memory(), RecordingTransport::default());

        let outcome = inventory
            .add_record(RecordDraft::new("Roti", "pak abu", 5))
            .await
            .unwrap();
        assert_eq!(outcome.record.vendor, "Pak Abu");

        let outcome = inventory
            .add_record(RecordDraft::new("Kopi", "Ah Seng", 5))
            .await
            .unwrap();
        assert_eq!(outcome.record.vendor, "Ah Seng");
        assert_eq!(inventory.vendors().all(), &["Ah Seng", "Kak Ani", "Pak Abu"]);
    }

    /// Backend whose record collection cannot be written
    struct ReadOnlyRecords(MemoryStore);

    impl KeyValueStore for ReadOnlyRecords {
        fn get(&self, key: &str) -> StorageResult<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            if key == keys::INVENTORY_ITEMS {
                return Err(StorageError::WriteError {
                    path: PathBuf::from(key),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "read-only"),
                });
            }
            self.0.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.0.remove(key)
        }
    }

    #[tokio::test]
    async fn test_failed_record_save_leaves_vendor_unregistered() {
        let backend = MemoryStore::new();
        let store = PersistentStore::new(ReadOnlyRecords(backend.clone()));
        let mut inventory = open_inventory(store, RecordingTransport::default());

        let err = inventory
            .add_record(RecordDraft::new("Kopi", "Ah Seng", 5))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::WriteError { .. }));
        assert!(!inventory.vendors().contains("Ah Seng"));
        assert!(backend.get(keys::VENDORS).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_end_to_end_submit_and_delete() {
        let store = PersistentStore::in_memory();
        let mut inventory = open_inventory(store.clone(), RecordingTransport::default());

        let form = RecordForm {
            name: "Nasi Lemak".to_string(),
            vendor: "Pak Abu".to_string(),
            stock_quantity: "20".to_string(),
            cost_price: "2.5".to_string(),
            sell_price: "4.0".to_string(),
            ..RecordForm::default()
        };
        let outcome = inventory.submit(&form).await.unwrap();
        assert_eq!(outcome.record.stock_quantity, 20);
        assert_eq!(inventory.records().len(), 1);

        assert!(inventory.delete_record(&outcome.record.id).unwrap());
        assert!(!inventory.delete_record(&outcome.record.id).unwrap());
        assert!(inventory.records().is_empty());

        let reloaded = open_inventory(store, RecordingTransport::default());
        assert!(reloaded.records().is_empty());
    }
}
