//! Type-safe identifier wrappers.
//!
//! Every persisted record has a strongly-typed ID to prevent accidental
//! mixing of identifiers at compile time. Record IDs use UUID v7
//! (time-ordered), so sorting by ID also sorts by creation.
//!
//! [`EventKey`] is different: it names an event *definition*, not a row.
//! It is the stable identifier a pending choice stores so the event can be
//! rebuilt from the catalog after a restart.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a savegame (one city played by one player).
    SavegameId
}

define_id! {
    /// Unique identifier for a persisted pending choice.
    PendingChoiceId
}

define_id! {
    /// Unique identifier for a persisted event notification.
    NotificationId
}

/// Stable identifier of an event definition, e.g. `"good_harvest"`.
///
/// Keys are compared as plain strings. Built-in content uses `&'static str`
/// keys so registering a definition never allocates; keys read back from
/// storage are owned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKey(Cow<'static, str>);

impl EventKey {
    /// Create a key from a static string.
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    /// Return the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventKey {
    fn from(key: String) -> Self {
        Self(Cow::Owned(key))
    }
}

impl core::fmt::Display for EventKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let save = SavegameId::new();
        let notification = NotificationId::new();
        assert_ne!(save.into_inner(), Uuid::nil());
        assert_ne!(notification.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let original = PendingChoiceId::new();
        let json = serde_json::to_string(&original).unwrap();
        let restored: PendingChoiceId = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn event_key_serializes_as_plain_string() {
        let key = EventKey::from_static("good_harvest");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"good_harvest\"");

        let restored: EventKey = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, key);
        assert_eq!(restored.as_str(), "good_harvest");
    }
}
