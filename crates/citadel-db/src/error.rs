//! Error types for the storage layer.
//!
//! Lookups that can legitimately miss (a pending choice id from a stale
//! page, another save's notification) return `Option` from the store;
//! [`StoreError`] is reserved for writes that hit a missing row and for
//! I/O or serialization faults.

use citadel_types::{NotificationId, PendingChoiceId, SavegameId};

/// Errors that can occur in the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No savegame with this id exists.
    #[error("savegame not found: {0}")]
    SavegameNotFound(SavegameId),

    /// No pending choice with this id exists for the save.
    #[error("pending choice not found: {0}")]
    PendingChoiceNotFound(PendingChoiceId),

    /// No notification with this id exists for the save.
    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),

    /// A record with this id already exists.
    #[error("duplicate record id: {0}")]
    Duplicate(uuid::Uuid),

    /// The save file was written by an incompatible format version.
    #[error("unsupported save file version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build reads and writes.
        expected: u32,
    },

    /// Reading or writing the save file failed.
    #[error("save file I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The save file could not be encoded or decoded.
    #[error("save file serialization error: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
