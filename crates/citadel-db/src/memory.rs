//! In-memory [`GameStore`] with JSON save files.
//!
//! All records live in plain vectors in insertion order, which is also
//! creation order, so "oldest first" queries are a filter over the vector.
//! [`MemoryStore::persist`] writes the whole store to disk atomically (write
//! to a sibling temp file, then rename) and [`MemoryStore::load`] reads it
//! back, so pending decisions survive a restart.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use citadel_types::{
    Notification, NotificationId, PendingChoice, PendingChoiceId, Savegame, SavegameId,
};
use citadel_world::{City, CityMap};

use crate::error::StoreError;
use crate::store::GameStore;

/// Save file format written by this build.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// A save and the map it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SaveRecord {
    savegame: Savegame,
    map: CityMap,
}

/// Records held by a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    saves: Vec<SaveRecord>,
    pending_choices: Vec<PendingChoice>,
    notifications: Vec<Notification>,
}

#[derive(Serialize)]
struct SaveFileOut<'a> {
    version: u32,
    store: &'a MemoryStore,
}

#[derive(Deserialize)]
struct SaveFileIn {
    version: u32,
    store: MemoryStore,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a store from a JSON save file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        let file: SaveFileIn = serde_json::from_str(&contents)?;
        if file.version != STORE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: file.version,
                expected: STORE_FORMAT_VERSION,
            });
        }
        info!(
            path = %path.display(),
            saves = file.store.saves.len(),
            pending_choices = file.store.pending_choices.len(),
            notifications = file.store.notifications.len(),
            "Save file loaded"
        );
        Ok(file.store)
    }

    /// Write the store to a JSON save file, replacing it atomically.
    pub fn persist(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&SaveFileOut {
            version: STORE_FORMAT_VERSION,
            store: self,
        })?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        info!(path = %path.display(), "Save file written");
        Ok(())
    }

    fn record(&self, id: SavegameId) -> Result<&SaveRecord, StoreError> {
        self.saves
            .iter()
            .find(|r| r.savegame.id == id)
            .ok_or(StoreError::SavegameNotFound(id))
    }

    fn record_mut(&mut self, id: SavegameId) -> Result<&mut SaveRecord, StoreError> {
        self.saves
            .iter_mut()
            .find(|r| r.savegame.id == id)
            .ok_or(StoreError::SavegameNotFound(id))
    }
}

impl GameStore for MemoryStore {
    fn insert_city(&mut self, city: City) -> Result<(), StoreError> {
        let id = city.id();
        if self.record(id).is_ok() {
            return Err(StoreError::Duplicate(id.into_inner()));
        }
        debug!(savegame_id = %id, city = %city.savegame.city_name, "Save inserted");
        self.saves.push(SaveRecord {
            savegame: city.savegame,
            map: city.map,
        });
        Ok(())
    }

    fn savegames(&self) -> Vec<Savegame> {
        self.saves.iter().map(|r| r.savegame.clone()).collect()
    }

    fn active_savegame_id(&self) -> Option<SavegameId> {
        self.saves
            .iter()
            .find(|r| r.savegame.is_active)
            .map(|r| r.savegame.id)
    }

    fn activate(&mut self, id: SavegameId) -> Result<(), StoreError> {
        self.record(id)?;
        for record in &mut self.saves {
            record.savegame.is_active = record.savegame.id == id;
        }
        debug!(savegame_id = %id, "Save activated");
        Ok(())
    }

    fn city(&self, id: SavegameId) -> Result<City, StoreError> {
        let record = self.record(id)?;
        Ok(City::new(record.savegame.clone(), record.map.clone()))
    }

    fn save_city(&mut self, city: &City) -> Result<(), StoreError> {
        let record = self.record_mut(city.id())?;
        record.savegame.clone_from(&city.savegame);
        record.map.clone_from(&city.map);
        Ok(())
    }

    fn delete_savegame(&mut self, id: SavegameId) -> Result<(), StoreError> {
        self.record(id)?;
        self.saves.retain(|r| r.savegame.id != id);
        self.pending_choices.retain(|p| p.savegame_id != id);
        self.notifications.retain(|n| n.savegame_id != id);
        info!(savegame_id = %id, "Save deleted");
        Ok(())
    }

    fn insert_pending_choice(&mut self, pending: PendingChoice) -> Result<(), StoreError> {
        self.record(pending.savegame_id)?;
        if self.pending_choices.iter().any(|p| p.id == pending.id) {
            return Err(StoreError::Duplicate(pending.id.into_inner()));
        }
        self.pending_choices.push(pending);
        Ok(())
    }

    fn pending_choice(
        &self,
        id: PendingChoiceId,
        savegame_id: SavegameId,
    ) -> Option<PendingChoice> {
        self.pending_choices
            .iter()
            .find(|p| p.id == id && p.savegame_id == savegame_id)
            .cloned()
    }

    fn pending_choices(&self, savegame_id: SavegameId) -> Vec<PendingChoice> {
        self.pending_choices
            .iter()
            .filter(|p| p.savegame_id == savegame_id)
            .cloned()
            .collect()
    }

    fn delete_pending_choice(
        &mut self,
        id: PendingChoiceId,
        savegame_id: SavegameId,
    ) -> Result<PendingChoice, StoreError> {
        let position = self
            .pending_choices
            .iter()
            .position(|p| p.id == id && p.savegame_id == savegame_id)
            .ok_or(StoreError::PendingChoiceNotFound(id))?;
        Ok(self.pending_choices.remove(position))
    }

    fn insert_notification(&mut self, notification: Notification) -> Result<(), StoreError> {
        self.record(notification.savegame_id)?;
        if self.notifications.iter().any(|n| n.id == notification.id) {
            return Err(StoreError::Duplicate(notification.id.into_inner()));
        }
        self.notifications.push(notification);
        Ok(())
    }

    fn notification(
        &self,
        id: NotificationId,
        savegame_id: SavegameId,
    ) -> Option<Notification> {
        self.notifications
            .iter()
            .find(|n| n.id == id && n.savegame_id == savegame_id)
            .cloned()
    }

    fn acknowledge_notification(
        &mut self,
        id: NotificationId,
        savegame_id: SavegameId,
    ) -> Result<Notification, StoreError> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.savegame_id == savegame_id)
            .ok_or(StoreError::NotificationNotFound(id))?;
        notification.acknowledged = true;
        Ok(notification.clone())
    }

    fn notifications(&self, savegame_id: SavegameId) -> Vec<Notification> {
        self.notifications
            .iter()
            .filter(|n| n.savegame_id == savegame_id)
            .cloned()
            .collect()
    }

    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            debug!("Transaction rolled back");
            *self = snapshot;
        }
        result
    }
}
