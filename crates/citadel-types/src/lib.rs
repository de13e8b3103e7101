//! Shared type definitions for the Citadel city simulation.
//!
//! This crate is the single source of truth for the records the event engine
//! reads and persists. Types flow downstream to `TypeScript` via `ts-rs` for
//! the host UI that renders notifications and pending choices.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers and the stable [`EventKey`]
//! - [`enums`] -- Resources, severities, building kinds and routing directives
//! - [`structs`] -- Savegame, map and event records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AcknowledgeDirective, BuildingKind, ChoiceDirective, Resource, Severity, TurnDirective,
};
pub use ids::{EventKey, NotificationId, PendingChoiceId, SavegameId};
pub use structs::{
    Building, BuildingType, DEFAULT_COINS, DEFAULT_START_YEAR, MAX_UNREST, Notification,
    PendingChoice, RUINS_DEMOLITION_COSTS, Savegame, Terrain, Tile,
};
