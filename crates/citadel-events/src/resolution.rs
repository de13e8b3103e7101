//! Presentation and resolution of pending choices.
//!
//! ```text
//! selected (has choices) --defer--> Pending --resolve(i)--> effects applied
//!                                                              |
//!                                                              +--> row deleted
//! ```
//!
//! The event is rebuilt from the stored key and roll seed, so the branch the
//! player picks carries the magnitudes that were shown. An invalid index
//! fails before anything is written. A second resolve of the same id fails
//! with not-found because the first one deleted the row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use citadel_db::GameStore;
use citadel_types::{ChoiceDirective, PendingChoice, PendingChoiceId, SavegameId, Severity};
use citadel_world::City;

use crate::catalog::Catalog;
use crate::choice::ChoiceSummary;
use crate::error::{EngineError, NotFoundError, PreconditionError};
use crate::event::Event;

/// A pending choice as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingChoiceView {
    /// Pending row id, used to resolve.
    pub id: PendingChoiceId,
    /// Event title.
    pub title: String,
    /// Display level.
    pub severity: Severity,
    /// Narrative describing the situation.
    pub text: String,
    /// Branches in index order.
    pub choices: Vec<ChoiceSummary>,
    /// When the decision was deferred.
    pub created_at: DateTime<Utc>,
}

/// Result of resolving a pending choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Event title.
    pub title: String,
    /// Display level.
    pub severity: Severity,
    /// Label of the branch that was applied.
    pub label: String,
    /// Narrative followed by the chosen label.
    pub message: String,
    /// Whether more decisions are waiting.
    pub directive: ChoiceDirective,
}

fn load<S: GameStore>(
    store: &S,
    catalog: &Catalog,
    savegame_id: SavegameId,
    id: PendingChoiceId,
) -> Result<(PendingChoice, City, Box<dyn Event>), EngineError> {
    let pending = store
        .pending_choice(id, savegame_id)
        .ok_or(NotFoundError::PendingChoice { id })?;
    let city = store.city(savegame_id)?;
    let event = catalog.instantiate(&pending.event_key, &city, pending.roll_seed)?;
    Ok((pending, city, event))
}

/// Rebuild a pending event for display. Changes nothing.
pub fn describe<S: GameStore>(
    store: &S,
    catalog: &Catalog,
    savegame_id: SavegameId,
    id: PendingChoiceId,
) -> Result<PendingChoiceView, EngineError> {
    let (pending, city, event) = load(store, catalog, savegame_id, id)?;
    Ok(PendingChoiceView {
        id: pending.id,
        title: event.title().to_owned(),
        severity: event.severity(),
        text: event.verbose_text(&city)?,
        choices: event.choices().iter().map(|c| c.summary()).collect(),
        created_at: pending.created_at,
    })
}

/// Apply branch `index` of a pending choice and delete the row.
///
/// Callers should run this inside [`GameStore::transaction`].
pub fn resolve<S: GameStore>(
    store: &mut S,
    catalog: &Catalog,
    savegame_id: SavegameId,
    id: PendingChoiceId,
    index: usize,
) -> Result<Resolution, EngineError> {
    let (pending, mut city, event) = load(store, catalog, savegame_id, id)?;

    let choices = event.choices();
    let Some(choice) = choices.get(index) else {
        warn!(pending_choice_id = %id, index, available = choices.len(), "Invalid choice");
        return Err(PreconditionError::InvalidChoiceIndex {
            index,
            available: choices.len(),
        }
        .into());
    };

    choice.apply(&mut city)?;
    let narrative = event.verbose_text(&city)?;
    city.refresh_enclosure();
    store.save_city(&city)?;
    store.delete_pending_choice(pending.id, savegame_id)?;

    let directive = if store.pending_choices(savegame_id).is_empty() {
        ChoiceDirective::Done
    } else {
        ChoiceDirective::MorePending
    };
    info!(
        pending_choice_id = %id,
        key = %pending.event_key,
        choice = %choice.label,
        ?directive,
        "Pending choice resolved"
    );

    Ok(Resolution {
        title: event.title().to_owned(),
        severity: event.severity(),
        label: choice.label.clone(),
        message: format!("{narrative}\n\nYou chose: {}", choice.label),
        directive,
    })
}
