//! Persistent store
//!
//! A durable key-value substrate holding one value per named key.
//!
//! ## Architecture
//!
//! - **KeyValueStore**: raw text backend (`FileStore` on disk, `MemoryStore` for tests)
//! - **PersistentStore**: typed load/save on top of a shared backend
//!
//! Loads never fail: a missing key, an unreadable file or a payload that does
//! not decode is logged and replaced by the caller's default. Writes are
//! synchronous and return a [`StorageError`] on failure.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistentStore};

/// Keys under which each entity is stored
pub mod keys {
    /// Ordered record collection (JSON array, newest first)
    pub const INVENTORY_ITEMS: &str = "inventory_items";
    /// Sorted vendor names (JSON array of strings)
    pub const VENDORS: &str = "vendors";
    /// Replication destination (plain text, empty disables replication)
    pub const SINK_URL: &str = "sink_url";
    /// Admin mode flag (JSON boolean)
    pub const ADMIN_MODE: &str = "admin_mode";
    /// Settings access secret (plain text, absent when unset)
    pub const ACCESS_SECRET: &str = "access_secret";
}
