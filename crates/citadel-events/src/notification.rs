//! Notification persistence and the acknowledgement gate.
//!
//! Every auto-applied event produces one notification. The player sees the
//! oldest unacknowledged one first and dismisses them one at a time; while
//! any remain, the year can't end.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use citadel_db::{GameStore, StoreError};
use citadel_types::{AcknowledgeDirective, Notification, NotificationId, SavegameId};
use citadel_world::City;

use crate::error::{EngineError, NotFoundError, PreconditionError};
use crate::processing::Outcome;

/// Persist the notification for an applied event.
pub fn record<S: GameStore>(
    store: &mut S,
    city: &City,
    outcome: &Outcome,
) -> Result<Notification, StoreError> {
    let notification = Notification {
        id: NotificationId::new(),
        savegame_id: city.id(),
        year: city.savegame.current_year,
        title: outcome.title.clone(),
        message: outcome.message.clone(),
        severity: outcome.severity,
        acknowledged: false,
        created_at: Utc::now(),
    };
    store.insert_notification(notification.clone())?;
    Ok(notification)
}

/// What the notification board shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationBoard {
    /// Oldest unacknowledged notification, if any.
    pub current: Option<Notification>,
    /// Number of unacknowledged notifications, `current` included.
    pub unacknowledged: usize,
}

/// Build the board for a save.
pub fn board<S: GameStore>(store: &S, savegame_id: SavegameId) -> NotificationBoard {
    let open = store.unacknowledged_notifications(savegame_id);
    NotificationBoard {
        unacknowledged: open.len(),
        current: open.into_iter().next(),
    }
}

/// Fail if any notification of the save is still unacknowledged.
pub fn ensure_acknowledged<S: GameStore>(
    store: &S,
    savegame_id: SavegameId,
) -> Result<(), PreconditionError> {
    let count = store.unacknowledged_notifications(savegame_id).len();
    if count > 0 {
        warn!(%savegame_id, count, "Turn blocked by unacknowledged notifications");
        return Err(PreconditionError::UnacknowledgedNotifications { count });
    }
    Ok(())
}

/// Mark a notification as seen and tell the caller where to go next.
pub fn acknowledge<S: GameStore>(
    store: &mut S,
    savegame_id: SavegameId,
    id: NotificationId,
) -> Result<AcknowledgeDirective, EngineError> {
    if store.notification(id, savegame_id).is_none() {
        return Err(NotFoundError::Notification { id }.into());
    }
    store.acknowledge_notification(id, savegame_id)?;

    let remaining = store.unacknowledged_notifications(savegame_id).len();
    info!(notification_id = %id, remaining, "Notification acknowledged");
    Ok(if remaining > 0 {
        AcknowledgeDirective::MoreUnacknowledged
    } else {
        AcknowledgeDirective::Done
    })
}
