//! Data models for Gerai
//!
//! Defines the inventory record and the draft it is created from.
//! Records are immutable once created; the only lifecycle event after
//! creation is deletion.

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SHORT_ID_LEN: usize = 8;

/// Opaque record identifier
///
/// Generated ids combine a millisecond timestamp with a random UUID, so they
/// are unique within a session and across reloads. Ids loaded from storage
/// are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generate a fresh id
    pub fn generate() -> Self {
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
        Self(format!("{}-{}", stamp, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last eight characters, enough to tell records apart in a listing
    pub fn short(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .nth(SHORT_ID_LEN - 1)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &self.0[start..]
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated record waiting for an identity
///
/// Produced by [`crate::form::RecordForm::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub name: String,
    pub vendor: String,
    pub stock_quantity: u32,
    pub cost_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}

impl RecordDraft {
    /// Create a draft with the required fields
    pub fn new(name: impl Into<String>, vendor: impl Into<String>, stock_quantity: u32) -> Self {
        Self {
            name: name.into(),
            vendor: vendor.into(),
            stock_quantity,
            cost_price: None,
            sell_price: None,
            image_url: None,
            notes: None,
        }
    }

    pub fn with_prices(mut self, cost_price: Option<f64>, sell_price: Option<f64>) -> Self {
        self.cost_price = cost_price;
        self.sell_price = sell_price;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// One stored inventory entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    /// Unique identifier, never reassigned
    pub id: RecordId,
    /// Calendar date the record was created
    pub date: NaiveDate,
    /// Item name
    pub name: String,
    /// Vendor, a member of the vendor registry
    pub vendor: String,
    /// Units in stock
    pub stock_quantity: u32,
    /// Unit cost, absent when not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    /// Unit selling price, absent when not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,
    /// Picture of the item (not checked for reachability)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InventoryRecord {
    /// Build a record from a draft with an assigned identity and date
    pub fn from_draft(id: RecordId, date: NaiveDate, draft: RecordDraft) -> Self {
        Self {
            id,
            date,
            name: draft.name,
            vendor: draft.vendor,
            stock_quantity: draft.stock_quantity,
            cost_price: draft.cost_price,
            sell_price: draft.sell_price,
            image_url: draft.image_url,
            notes: draft.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sample_record() -> InventoryRecord {
        let draft = RecordDraft::new("Nasi Lemak", "Pak Abu", 20)
            .with_prices(Some(2.5), Some(4.0))
            .with_notes("Sambal lebih pedas");
        InventoryRecord::from_draft(
            RecordId::from("r-1"),
            NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
            draft,
        )
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_starts_with_timestamp() {
        let id = RecordId::generate();
        let (stamp, random) = id.as_str().split_once('-').unwrap();
        assert!(stamp.ends_with('Z'));
        assert!(stamp.chars().take(8).all(|c| c.is_ascii_digit()));
        assert_eq!(random.len(), 32);
    }

    #[test]
    fn test_short_id_is_suffix() {
        let id = RecordId::from("20261005T101010.123Z-0123456789abcdef");
        assert_eq!(id.short(), "89abcdef");
        assert_eq!(RecordId::from("abc").short(), "abc");
        assert_eq!(RecordId::from("").short(), "");
    }

    #[test]
    fn test_from_draft_copies_fields() {
        let record = sample_record();
        assert_eq!(record.id.as_str(), "r-1");
        assert_eq!(record.name, "Nasi Lemak");
        assert_eq!(record.vendor, "Pak Abu");
        assert_eq!(record.stock_quantity, 20);
        assert_eq!(record.cost_price, Some(2.5));
        assert_eq!(record.sell_price, Some(4.0));
        assert!(record.image_url.is_none());
        assert_eq!(record.notes.as_deref(), Some("Sambal lebih pedas"));
    }

    #[test]
    fn test_serialization_uses_plain_date_and_omits_absent_fields() {
        let mut record = sample_record();
        record.cost_price = None;

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "r-1");
        assert_eq!(json["date"], "2026-10-05");
        assert!(json.get("cost_price").is_none());
        assert!(json.get("image_url").is_none());

        let parsed: InventoryRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_zero_price_is_not_absent() {
        let mut record = sample_record();
        record.cost_price = Some(0.0);

        let json = serde_json::to_string(&record).unwrap();
        let parsed: InventoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cost_price, Some(0.0));
    }
}
