//! Record repository
//!
//! Owns the ordered collection of inventory records. New records go to the
//! front, so the collection is always newest first, and that order survives
//! persistence round-trips. Every mutation rewrites the full collection.
//!
//! There is no update operation: records are immutable once created.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::models::{InventoryRecord, RecordDraft, RecordId};
use crate::storage::{keys, PersistentStore, StorageResult};

/// Ordered, persisted collection of inventory records
pub struct RecordRepository {
    records: Vec<InventoryRecord>,
    store: PersistentStore,
}

impl RecordRepository {
    /// Load the collection from the store
    ///
    /// A missing or undecodable collection starts empty. Duplicate ids keep
    /// their first (newest) occurrence.
    pub fn load(store: PersistentStore) -> Self {
        let stored: Vec<InventoryRecord> = store.load_json(keys::INVENTORY_ITEMS, Vec::new());
        let records = dedupe_by_id(stored);
        Self { records, store }
    }

    /// Create a record dated today and insert it at the front
    pub fn create(&mut self, draft: RecordDraft) -> StorageResult<InventoryRecord> {
        self.create_dated(draft, Local::now().date_naive())
    }

    /// Create a record with an explicit creation date
    pub fn create_dated(
        &mut self,
        draft: RecordDraft,
        date: NaiveDate,
    ) -> StorageResult<InventoryRecord> {
        let mut id = RecordId::generate();
        while self.contains(&id) {
            id = RecordId::generate();
        }

        let record = InventoryRecord::from_draft(id, date, draft);
        self.records.insert(0, record.clone());
        info!("Created record {} ({})", record.id, record.name);

        self.save()?;
        Ok(record)
    }

    /// Delete a record by id
    ///
    /// Returns whether a record was removed. Deleting an unknown id is a
    /// no-op and does not touch the store.
    pub fn delete(&mut self, id: &RecordId) -> StorageResult<bool> {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        if self.records.len() == before {
            return Ok(false);
        }

        info!("Deleted record {}", id);
        self.save()?;
        Ok(true)
    }

    /// All records, newest first
    pub fn all(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Look up a record by id
    pub fn get(&self, id: &RecordId) -> Option<&InventoryRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Find records whose id ends with `suffix` (see [`RecordId::short`])
    pub fn find_by_suffix(&self, suffix: &str) -> Vec<&InventoryRecord> {
        self.records
            .iter()
            .filter(|record| record.id.as_str().ends_with(suffix))
            .collect()
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn save(&self) -> StorageResult<()> {
        self.store.save_json(keys::INVENTORY_ITEMS, &self.records)
    }
}

fn dedupe_by_id(records: Vec<InventoryRecord>) -> Vec<InventoryRecord> {
    let mut seen = HashSet::new();
    let total = records.len();
    let unique: Vec<_> = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "Dropped {} stored record(s) with duplicate ids",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileStore;
    use tempfile::TempDir;

    fn draft(name: &str) -> RecordDraft {
        RecordDraft::new(name, "Pak Abu", 10)
    }

    #[test]
    fn test_create_assigns_unique_id_and_inserts_first() {
        let mut repo = RecordRepository::load(PersistentStore::in_memory());

        let first = repo.create(draft("Nasi Lemak")).unwrap();
        let second = repo.create(draft("Kuih Lapis")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.all()[0], second);
        assert_eq!(repo.all()[1], first);
        assert_eq!(first.date, Local::now().date_naive());
    }

    #[test]
    fn test_create_persists_full_collection() {
        let store = PersistentStore::in_memory();
        let mut repo = RecordRepository::load(store.clone());

        repo.create(draft("Nasi Lemak")).unwrap();
        repo.create(draft("Kuih Lapis")).unwrap();

        let reloaded = RecordRepository::load(store);
        assert_eq!(reloaded.all(), repo.all());
    }

    #[test]
    fn test_round_trip_preserves_order_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let store = PersistentStore::new(FileStore::open(temp_dir.path()).unwrap());
        let mut repo = RecordRepository::load(store);

        for i in 0..10 {
            let date = NaiveDate::from_ymd_opt(2026, 1, i + 1).unwrap();
            repo.create_dated(draft(&format!("Item {}", i)), date).unwrap();
        }

        let reopened =
            RecordRepository::load(PersistentStore::new(FileStore::open(temp_dir.path()).unwrap()));
        assert_eq!(reopened.all(), repo.all());
        assert_eq!(reopened.all()[0].name, "Item 9");
        assert_eq!(reopened.all()[9].name, "Item 0");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = PersistentStore::in_memory();
        let mut repo = RecordRepository::load(store.clone());
        let keep = repo.create(draft("Keep")).unwrap();
        let gone = repo.create(draft("Gone")).unwrap();

        assert!(repo.delete(&gone.id).unwrap());
        let after_first: Vec<_> = repo.all().to_vec();

        assert!(!repo.delete(&gone.id).unwrap());
        assert_eq!(repo.all(), after_first.as_slice());
        assert_eq!(repo.all(), &[keep]);

        // Deletion is persisted
        assert_eq!(RecordRepository::load(store).len(), 1);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut repo = RecordRepository::load(PersistentStore::in_memory());
        repo.create(draft("Only")).unwrap();

        assert!(!repo.delete(&RecordId::from("missing")).unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_corrupt_collection_loads_empty() {
        let store = PersistentStore::in_memory();
        store.save_text(keys::INVENTORY_ITEMS, "[{oops").unwrap();

        let repo = RecordRepository::load(store);
        assert!(repo.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_newest() {
        let store = PersistentStore::in_memory();
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        let newest = InventoryRecord::from_draft(RecordId::from("dup"), date, draft("Newest"));
        let older = InventoryRecord::from_draft(RecordId::from("dup"), date, draft("Older"));
        store.save_json(keys::INVENTORY_ITEMS, &vec![newest.clone(), older]).unwrap();

        let repo = RecordRepository::load(store);
        assert_eq!(repo.all(), &[newest]);
    }

    #[test]
    fn test_high_precision_prices_reload_exactly() {
        let temp_dir = TempDir::new().unwrap();
        let store = PersistentStore::new(FileStore::open(temp_dir.path()).unwrap());
        let mut repo = RecordRepository::load(store);

        let prices = [184586.67796601998, 0.1 + 0.2, 2.5, 1e-7, 98765.43210987654];
        for price in prices {
            let draft = draft("Kuih Lapis").with_prices(Some(price), Some(price * 3.0));
            repo.create(draft).unwrap();
        }

        let reopened =
            RecordRepository::load(PersistentStore::new(FileStore::open(temp_dir.path()).unwrap()));
        assert_eq!(reopened.all(), repo.all());
        assert_eq!(reopened.all()[4].cost_price, Some(184586.67796601998));
    }

    #[test]
    fn test_find_by_suffix() {
        let store = PersistentStore::in_memory();
        let date = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
        let records = vec![
            InventoryRecord::from_draft(RecordId::from("1-abc"), date, draft("One")),
            InventoryRecord::from_draft(RecordId::from("2-abd"), date, draft("Two")),
            InventoryRecord::from_draft(RecordId::from("3-xbc"), date, draft("Three")),
        ];
        store.save_json(keys::INVENTORY_ITEMS, &records).unwrap();

        let repo = RecordRepository::load(store);
        assert_eq!(repo.find_by_suffix("bc").len(), 2);
        assert_eq!(repo.find_by_suffix("abd")[0].name, "Two");
        assert!(repo.find_by_suffix("zzz").is_empty());
    }
}
