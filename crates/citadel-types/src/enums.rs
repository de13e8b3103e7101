//! Enumeration types for the Citadel simulation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A numeric attribute of a savegame that effects may mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// The city treasury. May go negative.
    Coins,
    /// Number of inhabitants.
    Population,
    /// Civil unrest in percent, bounded to `0..=100`.
    Unrest,
}

impl Resource {
    /// Lower-case attribute name as it appears in logs and messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Coins => "coins",
            Self::Population => "population",
            Self::Unrest => "unrest",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Display level of an event outcome.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Good news for the city.
    Success,
    /// A harmful outcome.
    Error,
    /// Something the player should watch.
    Warning,
    /// Neutral information.
    #[default]
    Info,
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// Broad category of a building type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    /// Any building the player can construct.
    #[default]
    Regular,
    /// Placeholder left behind after a building is destroyed.
    Ruins,
}

// ---------------------------------------------------------------------------
// Routing directives
// ---------------------------------------------------------------------------

/// What the host should present after a finished turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum TurnDirective {
    /// At least one auto-applied outcome waits for acknowledgement.
    ShowNotifications,
    /// No notifications, but at least one decision waits for the player.
    ShowPendingChoice,
    /// Quiet turn: nothing was selected.
    None,
}

/// What the host should present after a pending choice was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ChoiceDirective {
    /// The save still holds other pending choices.
    MorePending,
    /// No pending choices remain.
    Done,
}

/// What the host should present after a notification was acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum AcknowledgeDirective {
    /// Show the next unacknowledged notification.
    MoreUnacknowledged,
    /// Release the player back to normal play.
    Done,
}
