//! Persisted records for the Citadel simulation.
//!
//! A [`Savegame`] owns its [`Tile`]s, [`PendingChoice`]s and
//! [`Notification`]s; deleting the save deletes all of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{BuildingKind, Severity};
use crate::ids::{EventKey, NotificationId, PendingChoiceId, SavegameId};

// ---------------------------------------------------------------------------
// Savegame
// ---------------------------------------------------------------------------

/// Starting treasury of a new city.
pub const DEFAULT_COINS: i64 = 1000;

/// In-game year a new city is founded in.
pub const DEFAULT_START_YEAR: u32 = 1150;

/// Upper bound of the unrest percentage.
pub const MAX_UNREST: i64 = 100;

/// One city played by one player.
///
/// Resource counters are signed so intermediate arithmetic never wraps;
/// only `coins` may legitimately stay negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Savegame {
    /// Unique identifier.
    pub id: SavegameId,
    /// Name the player gave the city.
    pub city_name: String,
    /// Treasury.
    pub coins: i64,
    /// Inhabitants.
    pub population: i64,
    /// Unrest in percent.
    pub unrest: i64,
    /// Current in-game year, incremented once per finished turn.
    pub current_year: u32,
    /// Whether this is the save currently being played.
    pub is_active: bool,
    /// Whether the city buildings are fully enclosed by walls.
    pub is_enclosed: bool,
}

impl Savegame {
    /// Create a fresh, inactive save with default starting values.
    pub fn new(city_name: impl Into<String>) -> Self {
        Self {
            id: SavegameId::new(),
            city_name: city_name.into(),
            coins: DEFAULT_COINS,
            population: 0,
            unrest: 0,
            current_year: DEFAULT_START_YEAR,
            is_active: false,
            is_enclosed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Kind of ground a tile sits on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Terrain {
    /// Display name, e.g. "Grassland".
    pub name: String,
    /// Water tiles can't hold most buildings. They never count as walls.
    pub is_water: bool,
}

impl Terrain {
    /// Plain buildable land.
    pub fn grassland() -> Self {
        Self {
            name: "Grassland".to_owned(),
            is_water: false,
        }
    }
}

/// Classification flags shared by all buildings of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BuildingType {
    /// Display name, e.g. "House".
    pub name: String,
    /// Regular building or ruins placeholder.
    pub kind: BuildingKind,
    /// Countryside building (farms, mines).
    pub is_country: bool,
    /// Building inside the city.
    pub is_city: bool,
    /// Provides housing.
    pub is_house: bool,
    /// Part of the city wall.
    pub is_wall: bool,
    /// At most one per city (town hall, cathedral).
    pub is_unique: bool,
}

/// A concrete building occupying a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Building {
    /// Display name, e.g. "Small House".
    pub name: String,
    /// Classification flags.
    pub building_type: BuildingType,
    /// Upgrade level, starting at 1.
    pub level: u32,
    /// Coins collected per year.
    pub taxes: u32,
    /// Coins charged to construct.
    pub building_costs: u32,
    /// Coins charged to demolish.
    pub demolition_costs: u32,
    /// Coins charged per year.
    pub maintenance_costs: u32,
    /// Inhabitants this building can house.
    pub housing_space: u32,
    /// Defense contributed when the city is enclosed.
    pub defense_value: u32,
    /// Prestige contributed.
    pub prestige: u32,
}

/// Demolition cost of the ruins placeholder.
pub const RUINS_DEMOLITION_COSTS: u32 = 20;

impl Building {
    /// The placeholder left behind when a building is destroyed.
    ///
    /// Ruins yield nothing and must be demolished by the player.
    pub fn ruins() -> Self {
        Self {
            name: "Ruins".to_owned(),
            building_type: BuildingType {
                name: "Ruins".to_owned(),
                kind: BuildingKind::Ruins,
                is_country: false,
                is_city: false,
                is_house: false,
                is_wall: false,
                is_unique: false,
            },
            level: 1,
            taxes: 0,
            building_costs: 0,
            demolition_costs: RUINS_DEMOLITION_COSTS,
            maintenance_costs: 0,
            housing_space: 0,
            defense_value: 0,
            prestige: 0,
        }
    }

    /// Whether this building is the ruins placeholder.
    pub fn is_ruins(&self) -> bool {
        self.building_type.kind == BuildingKind::Ruins
    }
}

/// One cell of a city map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tile {
    /// Owning save.
    pub savegame_id: SavegameId,
    /// Column, starting at 0.
    pub x: u32,
    /// Row, starting at 0.
    pub y: u32,
    /// Ground type.
    pub terrain: Terrain,
    /// Occupant, if any.
    pub building: Option<Building>,
}

impl core::fmt::Display for Tile {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Event records
// ---------------------------------------------------------------------------

/// A choice-bearing event that was selected but not yet resolved.
///
/// Only the definition key and the roll seed are stored; the event itself
/// is rebuilt from the catalog whenever it is shown or resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PendingChoice {
    /// Unique identifier.
    pub id: PendingChoiceId,
    /// Owning save.
    pub savegame_id: SavegameId,
    /// Stable identifier of the originating event definition.
    #[ts(as = "String")]
    pub event_key: EventKey,
    /// Seed the event's magnitudes were rolled from.
    #[ts(as = "String")]
    pub roll_seed: u64,
    /// When the decision was deferred.
    pub created_at: DateTime<Utc>,
}

/// Acknowledgement-gated outcome of an auto-applied event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Owning save.
    pub savegame_id: SavegameId,
    /// In-game year the event occurred in.
    pub year: u32,
    /// Event title.
    pub title: String,
    /// Outcome text, produced after the effects ran.
    pub message: String,
    /// Display level.
    pub severity: Severity,
    /// Set once the player dismissed it.
    pub acknowledged: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl core::fmt::Display for Notification {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} (Year {})", self.title, self.year)
    }
}
