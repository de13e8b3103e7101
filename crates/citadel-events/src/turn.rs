//! The turn orchestrator.
//!
//! ```text
//! finish_turn
//!     |
//!     +-- active save?                   no  -> Precondition (400)
//!     +-- unacknowledged notifications?  yes -> Precondition (400)
//!     |
//!     +-- transaction {
//!     |       year += 1
//!     |       select (shared threshold)
//!     |       for each selected event, in catalog order:
//!     |           has choices -> defer (PendingChoice)
//!     |           otherwise   -> auto-apply -> Notification
//!     |       refresh wall enclosure, save city
//!     |   }
//!     |
//!     +-- directive: ShowNotifications | ShowPendingChoice | None
//! ```
//!
//! [`TurnEngine`] is also the entry point for the player's follow-up
//! requests: acknowledging notifications and presenting or resolving
//! pending choices. All of them operate on the active save only.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};

use citadel_db::GameStore;
use citadel_types::{
    AcknowledgeDirective, Notification, NotificationId, PendingChoice, PendingChoiceId,
    SavegameId, TurnDirective,
};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::{EngineError, PreconditionError};
use crate::notification::{self, NotificationBoard};
use crate::resolution::{self, PendingChoiceView, Resolution};
use crate::{choice_storage, processing, selection};

/// Summary of one finished turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// The year that was just entered.
    pub year: u32,
    /// Where the player should be sent next.
    pub directive: TurnDirective,
    /// Notifications created this turn, in processing order.
    pub notifications: Vec<Notification>,
    /// Decisions deferred this turn, in processing order.
    pub pending_choices: Vec<PendingChoice>,
    /// Quiet-year text when no event fired at all.
    pub message: Option<String>,
}

/// Runs turns and the follow-up flows against a [`GameStore`].
#[derive(Debug)]
pub struct TurnEngine {
    catalog: Catalog,
    config: EngineConfig,
    rng: StdRng,
}

impl TurnEngine {
    /// Create an engine. The turn RNG is seeded from `config.turn.seed`, or
    /// from OS entropy when no seed is configured.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        let rng = config
            .turn
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            catalog,
            config,
            rng,
        }
    }

    /// Replace the turn RNG.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The event catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Advance the active save by one year.
    ///
    /// Rejected without any change while a notification is unacknowledged.
    pub fn finish_turn<S: GameStore>(&mut self, store: &mut S) -> Result<TurnReport, EngineError> {
        let savegame_id = active_save(store)?;
        notification::ensure_acknowledged(store, savegame_id)?;
        store.transaction(|s| self.run_turn(s, savegame_id))
    }

    fn run_turn<S: GameStore>(
        &mut self,
        store: &mut S,
        savegame_id: SavegameId,
    ) -> Result<TurnReport, EngineError> {
        let mut city = store.city(savegame_id)?;
        city.savegame.current_year = city.savegame.current_year.saturating_add(1);
        let year = city.savegame.current_year;
        info!(%savegame_id, year, "Turn started");

        let selection = selection::select(
            &self.catalog,
            &city,
            self.config.selection.threshold_max,
            &mut self.rng,
        );

        let mut notifications = Vec::new();
        let mut pending_choices = Vec::new();
        for selected in &selection.events {
            if selected.event.has_choices() {
                pending_choices.push(choice_storage::defer(store, savegame_id, selected)?);
            } else {
                let outcome =
                    processing::auto_apply(&selected.key, selected.event.as_ref(), &mut city)?;
                notifications.push(notification::record(store, &city, &outcome)?);
            }
        }

        city.refresh_enclosure();
        store.save_city(&city)?;

        let directive = if !notifications.is_empty() {
            TurnDirective::ShowNotifications
        } else if !pending_choices.is_empty() {
            TurnDirective::ShowPendingChoice
        } else {
            TurnDirective::None
        };
        let message = selection
            .is_quiet()
            .then(|| self.config.turn.quiet_turn_message.clone());

        info!(
            year,
            notifications = notifications.len(),
            pending_choices = pending_choices.len(),
            ?directive,
            "Turn finished"
        );
        Ok(TurnReport {
            year,
            directive,
            notifications,
            pending_choices,
            message,
        })
    }

    /// Apply branch `index` of a pending choice of the active save.
    pub fn resolve_pending_choice<S: GameStore>(
        &self,
        store: &mut S,
        id: PendingChoiceId,
        index: usize,
    ) -> Result<Resolution, EngineError> {
        let savegame_id = active_save(store)?;
        store.transaction(|s| resolution::resolve(s, &self.catalog, savegame_id, id, index))
    }

    /// Rebuild a pending choice of the active save for display.
    pub fn describe_pending_choice<S: GameStore>(
        &self,
        store: &S,
        id: PendingChoiceId,
    ) -> Result<PendingChoiceView, EngineError> {
        let savegame_id = active_save(store)?;
        resolution::describe(store, &self.catalog, savegame_id, id)
    }

    /// Pending choices of the active save, oldest first.
    pub fn pending_choices<S: GameStore>(
        &self,
        store: &S,
    ) -> Result<Vec<PendingChoice>, EngineError> {
        let savegame_id = active_save(store)?;
        Ok(store.pending_choices(savegame_id))
    }

    /// Dismiss a notification of the active save.
    pub fn acknowledge_notification<S: GameStore>(
        &self,
        store: &mut S,
        id: NotificationId,
    ) -> Result<AcknowledgeDirective, EngineError> {
        let savegame_id = active_save(store)?;
        store.transaction(|s| notification::acknowledge(s, savegame_id, id))
    }

    /// The oldest unacknowledged notification of the active save.
    pub fn notification_board<S: GameStore>(
        &self,
        store: &S,
    ) -> Result<NotificationBoard, EngineError> {
        let savegame_id = active_save(store)?;
        Ok(notification::board(store, savegame_id))
    }
}

fn active_save<S: GameStore>(store: &S) -> Result<SavegameId, PreconditionError> {
    store.active_savegame_id().ok_or_else(|| {
        warn!("Request rejected: no active savegame");
        PreconditionError::NoActiveSave
    })
}
