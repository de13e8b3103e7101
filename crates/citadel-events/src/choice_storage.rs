//! Deferral of choice-bearing events.
//!
//! A selected event with choices is never applied. Only its key and roll
//! seed are persisted; the instance itself is dropped and rebuilt from the
//! catalog when the player looks at or resolves the decision.

use chrono::Utc;
use tracing::info;

use citadel_db::{GameStore, StoreError};
use citadel_types::{PendingChoice, PendingChoiceId, SavegameId};

use crate::selection::SelectedEvent;

/// Persist a pending decision for `selected`.
pub fn defer<S: GameStore>(
    store: &mut S,
    savegame_id: SavegameId,
    selected: &SelectedEvent,
) -> Result<PendingChoice, StoreError> {
    let pending = PendingChoice {
        id: PendingChoiceId::new(),
        savegame_id,
        event_key: selected.key.clone(),
        roll_seed: selected.roll_seed,
        created_at: Utc::now(),
    };
    store.insert_pending_choice(pending.clone())?;
    info!(
        pending_choice_id = %pending.id,
        key = %pending.event_key,
        "Event deferred for player choice"
    );
    Ok(pending)
}
