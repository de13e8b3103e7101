//! The [`City`] aggregate: a savegame together with its map.
//!
//! This is the resource-mutation target events act on. Domain clamping
//! lives here, not in the effects that write:
//!
//! - `unrest` is kept within `0..=MAX_UNREST`.
//! - `population` never drops below zero, and an increase never lifts it
//!   above the housing capacity (a city that is already over capacity
//!   keeps its current population instead of losing inhabitants).
//! - `coins` is unbounded; the treasury may go into debt.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use citadel_types::{Building, MAX_UNREST, Resource, Savegame, SavegameId};

use crate::economy::{self, Balance};
use crate::error::WorldError;
use crate::map::{CityMap, TileCoord};
use crate::{defense, enclosure, housing, prestige};

/// A savegame and the map it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// Resource counters, year and flags.
    pub savegame: Savegame,
    /// The tile grid.
    pub map: CityMap,
}

impl City {
    /// Bundle a save with its map.
    pub const fn new(savegame: Savegame, map: CityMap) -> Self {
        Self { savegame, map }
    }

    /// Identifier of the underlying save.
    pub const fn id(&self) -> SavegameId {
        self.savegame.id
    }

    /// Current value of a resource.
    pub const fn resource(&self, resource: Resource) -> i64 {
        match resource {
            Resource::Coins => self.savegame.coins,
            Resource::Population => self.savegame.population,
            Resource::Unrest => self.savegame.unrest,
        }
    }

    /// Write a resource, applying the domain bounds. Returns the stored value.
    pub fn set_resource(&mut self, resource: Resource, value: i64) -> i64 {
        let current = self.resource(resource);
        let stored = match resource {
            Resource::Coins => value,
            Resource::Population => {
                let floored = value.max(0);
                if floored > current {
                    floored.min(current.max(self.housing_capacity()))
                } else {
                    floored
                }
            }
            Resource::Unrest => value.clamp(0, MAX_UNREST),
        };

        if stored != value {
            debug!(%resource, requested = value, stored, "Resource write clamped");
        }

        match resource {
            Resource::Coins => self.savegame.coins = stored,
            Resource::Population => self.savegame.population = stored,
            Resource::Unrest => self.savegame.unrest = stored,
        }
        stored
    }

    /// Inhabitants the city can house.
    pub fn housing_capacity(&self) -> i64 {
        housing::capacity(&self.map)
    }

    /// Aggregate prestige.
    pub fn prestige(&self) -> i64 {
        prestige::total(&self.map)
    }

    /// Aggregate defense (zero when not enclosed).
    pub fn defense(&self) -> i64 {
        defense::total(&self.map)
    }

    /// Whether the walls enclose every city building.
    pub fn is_enclosed(&self) -> bool {
        enclosure::is_enclosed(&self.map)
    }

    /// Recompute and store the enclosure flag. Returns the new value.
    pub fn refresh_enclosure(&mut self) -> bool {
        let enclosed = self.is_enclosed();
        if enclosed != self.savegame.is_enclosed {
            debug!(enclosed, "Wall enclosure changed");
        }
        self.savegame.is_enclosed = enclosed;
        enclosed
    }

    /// Yearly taxes against maintenance.
    pub fn balance(&self) -> Balance {
        economy::balance(&self.map)
    }

    /// Whether any building pays taxes.
    pub fn has_taxed_buildings(&self) -> bool {
        self.map.buildings().any(|(_, b)| b.taxes > 0)
    }

    /// Whether any building costs maintenance.
    pub fn has_maintained_buildings(&self) -> bool {
        self.map.buildings().any(|(_, b)| b.maintenance_costs > 0)
    }

    /// First tile holding a house, row-major.
    pub fn first_house(&self) -> Option<TileCoord> {
        self.map
            .buildings()
            .find(|(_, b)| b.building_type.is_house)
            .map(|(coord, _)| coord)
    }

    /// Tiles raiders may destroy: plain city buildings, excluding walls,
    /// countryside and unique buildings.
    pub fn raid_targets(&self) -> Vec<TileCoord> {
        self.map
            .buildings()
            .filter(|(_, b)| {
                let t = &b.building_type;
                t.is_city && !t.is_wall && !t.is_country && !t.is_unique
            })
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Pick up to `count` distinct raid targets at random.
    pub fn choose_raid_targets<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<TileCoord> {
        self.raid_targets()
            .choose_multiple(rng, count)
            .copied()
            .collect()
    }

    /// Name of the building on a tile, if any.
    pub fn building_name(&self, coord: TileCoord) -> Option<&str> {
        self.map
            .tile(coord)
            .and_then(|t| t.building.as_ref())
            .map(|b| b.name.as_str())
    }

    /// Replace a tile's occupant with the ruins placeholder.
    ///
    /// Returns the building that stood there. An empty tile also ends up
    /// holding ruins.
    pub fn replace_with_ruins(&mut self, coord: TileCoord) -> Result<Option<Building>, WorldError> {
        let previous = self.map.place(coord, Building::ruins())?;
        debug!(
            tile = %coord,
            building = previous.as_ref().map_or("-", |b| b.name.as_str()),
            "Building replaced with ruins"
        );
        Ok(previous)
    }
}
