//! Storage error handling
//!
//! Provides typed errors for persistent store writes with descriptive
//! messages and recovery suggestions. Reads never surface these; they fall
//! back to defaults instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing to the persistent store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create the store directory
    #[error("Failed to create store directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Value could not be encoded for storage
    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key is not usable as a file name
    #[error("Invalid store key: '{0}'")]
    InvalidKey(String),

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// In-memory backend lock was poisoned
    #[error("Store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl StorageError {
    /// Wrap a failed write, singling out permission problems
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied {
                path,
                source: error,
            }
        } else {
            StorageError::WriteError {
                path,
                source: error,
            }
        }
    }

    /// Whether the user can fix this without touching the data
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StorageError::PermissionDenied { .. } | StorageError::CreateDirectory { .. }
        )
    }

    /// Hint shown next to the error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to change ownership of the data directory.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            _ => None,
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
