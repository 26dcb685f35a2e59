//! Gerai Core Library
//!
//! This crate provides the core functionality for Gerai, a single-user
//! inventory tracker for a small retail stall.
//!
//! # Architecture
//!
//! - **Persistent store**: one named value per entity, on disk or in memory
//! - **Repositories**: records, vendors and settings, each owning one key
//! - **Replication**: best-effort, response-blind mirroring to a spreadsheet sink
//!
//! In-memory state is authoritative; every mutation is mirrored to the store
//! before it returns.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut inventory = Inventory::open(&config)?;
//!
//! let draft = RecordDraft::new("Nasi Lemak", "Pak Abu", 20);
//! let outcome = inventory.add_record(draft).await?;
//!
//! let records = inventory.records().all();
//! ```
//!
//! # Modules
//!
//! - `inventory`: Unified interface and create/replicate flow (main entry point)
//! - `models`: Inventory record, draft and id
//! - `form`: Validation of raw user input
//! - `repository`: Ordered record collection
//! - `vendors`: Vendor registry
//! - `settings`: Sink URL, admin mode, access PIN
//! - `replication`: Sink payload, transport and client
//! - `storage`: Key-value persistence
//! - `format`: Currency and date display
//! - `config`: Application configuration

pub mod config;
pub mod form;
pub mod format;
pub mod inventory;
pub mod models;
pub mod replication;
pub mod repository;
pub mod settings;
pub mod storage;
pub mod vendors;

pub use config::Config;
pub use form::{RecordForm, ValidationError};
pub use inventory::{CreateOutcome, Inventory, ReplicationStatus, SubmitError};
pub use models::{InventoryRecord, RecordDraft, RecordId};
pub use replication::{HttpTransport, ReplicationClient, ReplicationOutcome, Transport, TransportError};
pub use repository::RecordRepository;
pub use settings::{AccessGate, SecretError, Settings};
pub use storage::{PersistentStore, StorageError, StorageResult};
pub use vendors::VendorRegistry;
