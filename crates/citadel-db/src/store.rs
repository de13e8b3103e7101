//! The storage contract the event engine is written against.
//!
//! Reads that are scoped to a save (`pending_choice`, `notification`)
//! return `None` both when the id does not exist and when it belongs to a
//! different save, so callers can't tell the two apart.

use citadel_types::{
    Notification, NotificationId, PendingChoice, PendingChoiceId, Savegame, SavegameId,
};
use citadel_world::City;

use crate::error::StoreError;

/// Synchronous persistence for saves, pending choices and notifications.
pub trait GameStore {
    // =======================================================================
    // Savegames
    // =======================================================================

    /// Store a new city (save plus map).
    fn insert_city(&mut self, city: City) -> Result<(), StoreError>;

    /// All saves, in creation order.
    fn savegames(&self) -> Vec<Savegame>;

    /// The save currently being played, if any.
    fn active_savegame_id(&self) -> Option<SavegameId>;

    /// Mark a save as active and every other save as inactive.
    fn activate(&mut self, id: SavegameId) -> Result<(), StoreError>;

    /// Load a city by save id.
    fn city(&self, id: SavegameId) -> Result<City, StoreError>;

    /// Overwrite the stored save and map with `city`.
    fn save_city(&mut self, city: &City) -> Result<(), StoreError>;

    /// Delete a save together with its map, pending choices and
    /// notifications.
    fn delete_savegame(&mut self, id: SavegameId) -> Result<(), StoreError>;

    // =======================================================================
    // Pending choices
    // =======================================================================

    /// Persist a deferred decision.
    fn insert_pending_choice(&mut self, pending: PendingChoice) -> Result<(), StoreError>;

    /// Look up a pending choice owned by `savegame_id`.
    fn pending_choice(
        &self,
        id: PendingChoiceId,
        savegame_id: SavegameId,
    ) -> Option<PendingChoice>;

    /// Pending choices of a save, oldest first.
    fn pending_choices(&self, savegame_id: SavegameId) -> Vec<PendingChoice>;

    /// Remove a pending choice owned by `savegame_id`, returning it.
    fn delete_pending_choice(
        &mut self,
        id: PendingChoiceId,
        savegame_id: SavegameId,
    ) -> Result<PendingChoice, StoreError>;

    // =======================================================================
    // Notifications
    // =======================================================================

    /// Persist a notification.
    fn insert_notification(&mut self, notification: Notification) -> Result<(), StoreError>;

    /// Look up a notification owned by `savegame_id`.
    fn notification(&self, id: NotificationId, savegame_id: SavegameId)
    -> Option<Notification>;

    /// Set the acknowledged flag of a notification owned by `savegame_id`.
    fn acknowledge_notification(
        &mut self,
        id: NotificationId,
        savegame_id: SavegameId,
    ) -> Result<Notification, StoreError>;

    /// Every notification of a save, oldest first.
    fn notifications(&self, savegame_id: SavegameId) -> Vec<Notification>;

    /// Unacknowledged notifications of a save, oldest first.
    fn unacknowledged_notifications(&self, savegame_id: SavegameId) -> Vec<Notification> {
        self.notifications(savegame_id)
            .into_iter()
            .filter(|n| !n.acknowledged)
            .collect()
    }

    // =======================================================================
    // Unit of work
    // =======================================================================

    /// Run `f` as one unit of work.
    ///
    /// If `f` returns `Err`, every write it made is discarded and the store
    /// is left exactly as it was before the call.
    fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, E>;
}
