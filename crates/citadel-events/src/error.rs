//! Error types for the event engine.
//!
//! [`EngineError`] partitions every failure into the classes a host cares
//! about:
//!
//! - [`ConfigurationError`]: a content authoring bug. Fatal, never
//!   swallowed.
//! - [`PreconditionError`]: the request can't run right now. User-facing,
//!   no state was changed.
//! - [`NotFoundError`]: the id does not exist for the active save.
//! - [`StoreError`]: the storage layer failed.

use citadel_db::StoreError;
use citadel_types::{EventKey, NotificationId, PendingChoiceId};

use crate::effect::EffectError;

/// A content definition is broken.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Two definitions were registered under the same key.
    #[error("event '{key}' is registered twice")]
    DuplicateEvent {
        /// The clashing key.
        key: EventKey,
    },

    /// A stored key has no definition in the catalog.
    #[error("event '{key}' is not in the catalog")]
    UnknownEvent {
        /// The unresolved key.
        key: EventKey,
    },

    /// A definition did not provide its outcome text.
    #[error("event '{event}' does not implement its outcome text")]
    MissingVerboseText {
        /// Title of the offending event.
        event: String,
    },

    /// An effect could not be applied to its target.
    #[error("invalid effect: {source}")]
    Effect {
        /// The underlying effect error.
        #[from]
        source: EffectError,
    },
}

/// A request was rejected before it changed anything.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    /// No save is marked active.
    #[error("no active savegame found")]
    NoActiveSave,

    /// The player has not dismissed every notification yet.
    #[error("{count} notification(s) must be acknowledged before the year can end")]
    UnacknowledgedNotifications {
        /// Number of notifications still open.
        count: usize,
    },

    /// The choice index is outside the event's choice list.
    #[error("invalid choice {index}: the event offers {available} choice(s)")]
    InvalidChoiceIndex {
        /// Index the caller asked for.
        index: usize,
        /// Number of choices the event offers.
        available: usize,
    },
}

/// The id does not exist, or belongs to another save.
#[derive(Debug, thiserror::Error)]
pub enum NotFoundError {
    /// Unknown pending choice.
    #[error("pending choice not found: {id}")]
    PendingChoice {
        /// The requested id.
        id: PendingChoiceId,
    },

    /// Unknown notification.
    #[error("notification not found: {id}")]
    Notification {
        /// The requested id.
        id: NotificationId,
    },
}

/// Any failure surfaced by the engine's entry points.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Broken content. Fatal.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The request can't run in the current state.
    #[error("precondition failed: {0}")]
    Precondition(#[from] PreconditionError),

    /// The referenced record does not exist for the active save.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Storage failure.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<EffectError> for EngineError {
    fn from(source: EffectError) -> Self {
        Self::Configuration(ConfigurationError::Effect { source })
    }
}

impl EngineError {
    /// HTTP-style status code a host should answer with.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Precondition(_) => 400,
            Self::NotFound(_) => 404,
            Self::Configuration(_) | Self::Store(_) => 500,
        }
    }

    /// Whether the error indicates a bug or an infrastructure fault rather
    /// than a rejected request.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Store(_))
    }
}
