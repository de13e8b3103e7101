//! Atomic state mutations applied by events and chosen branches.
//!
//! An [`Effect`] is a value object: it records *what* to change, and
//! [`Effect::apply`] performs exactly one read-compute-write cycle against
//! an [`EffectTarget`]. Bounds (unrest percentage, housing ceiling) belong
//! to the target; an effect only computes the unclamped value.
//!
//! Applying the same effect twice applies its delta twice. Callers are
//! responsible for at-most-once application.

use citadel_types::{Building, Resource};
use citadel_world::{City, TileCoord, WorldError};
use tracing::debug;

/// Errors raised while applying an effect.
#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// The target has no such attribute.
    #[error("target has no attribute '{resource}'")]
    UnknownAttribute {
        /// The attribute the effect addressed.
        resource: Resource,
    },

    /// The building removal collaborator rejected the tile.
    #[error("building removal failed: {source}")]
    Building {
        /// The underlying map error.
        #[from]
        source: WorldError,
    },
}

/// Anything effects can be applied to.
pub trait EffectTarget {
    /// Current value of an attribute, `None` if the target lacks it.
    fn read(&self, resource: Resource) -> Option<i64>;

    /// Store a new value. The target clamps it into its domain and returns
    /// what was stored, or `None` if it lacks the attribute.
    fn write(&mut self, resource: Resource, value: i64) -> Option<i64>;

    /// Replace the occupant of a tile with the ruins placeholder.
    fn replace_with_ruins(&mut self, tile: TileCoord) -> Result<Option<Building>, WorldError>;
}

impl EffectTarget for City {
    fn read(&self, resource: Resource) -> Option<i64> {
        Some(self.resource(resource))
    }

    fn write(&mut self, resource: Resource, value: i64) -> Option<i64> {
        Some(self.set_resource(resource, value))
    }

    fn replace_with_ruins(&mut self, tile: TileCoord) -> Result<Option<Building>, WorldError> {
        Self::replace_with_ruins(self, tile)
    }
}

/// Sign of an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Add to the current value.
    Increase,
    /// Subtract from the current value.
    Decrease,
}

/// Non-negative size of an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    /// A fixed number of units.
    Absolute(u32),
    /// A fraction of the current value, in percent, rounded half up.
    Relative(u32),
}

/// One atomic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Move a resource up or down.
    Adjust {
        /// Attribute to change.
        resource: Resource,
        /// Sign of the change.
        direction: Direction,
        /// Size of the change.
        amount: Amount,
    },
    /// Turn a tile's building into ruins.
    RemoveBuilding {
        /// Tile to clear.
        tile: TileCoord,
    },
}

impl Effect {
    /// Absolute increase.
    pub const fn increase(resource: Resource, amount: u32) -> Self {
        Self::Adjust {
            resource,
            direction: Direction::Increase,
            amount: Amount::Absolute(amount),
        }
    }

    /// Absolute decrease.
    pub const fn decrease(resource: Resource, amount: u32) -> Self {
        Self::Adjust {
            resource,
            direction: Direction::Decrease,
            amount: Amount::Absolute(amount),
        }
    }

    /// Relative increase by `percent` of the current value.
    pub const fn increase_relative(resource: Resource, percent: u32) -> Self {
        Self::Adjust {
            resource,
            direction: Direction::Increase,
            amount: Amount::Relative(percent),
        }
    }

    /// Relative decrease by `percent` of the current value.
    pub const fn decrease_relative(resource: Resource, percent: u32) -> Self {
        Self::Adjust {
            resource,
            direction: Direction::Decrease,
            amount: Amount::Relative(percent),
        }
    }

    /// Replace the building on `tile` with ruins.
    pub const fn remove_building(tile: TileCoord) -> Self {
        Self::RemoveBuilding { tile }
    }

    /// Apply the effect to `target`.
    pub fn apply<T: EffectTarget + ?Sized>(&self, target: &mut T) -> Result<(), EffectError> {
        match *self {
            Self::Adjust {
                resource,
                direction,
                amount,
            } => {
                let current = target
                    .read(resource)
                    .ok_or(EffectError::UnknownAttribute { resource })?;
                let requested = compute(current, direction, amount);
                let stored = target
                    .write(resource, requested)
                    .ok_or(EffectError::UnknownAttribute { resource })?;
                debug!(effect = %self, current, requested, stored, "Effect applied");
            }
            Self::RemoveBuilding { tile } => {
                let previous = target.replace_with_ruins(tile)?;
                debug!(
                    effect = %self,
                    building = previous.as_ref().map_or("-", |b| b.name.as_str()),
                    "Effect applied"
                );
            }
        }
        Ok(())
    }
}

impl core::fmt::Display for Effect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Adjust {
                resource,
                direction,
                amount,
            } => {
                let sign = match direction {
                    Direction::Increase => '+',
                    Direction::Decrease => '-',
                };
                match amount {
                    Amount::Absolute(n) => write!(f, "{resource} {sign}{n}"),
                    Amount::Relative(p) => write!(f, "{resource} {sign}{p}%"),
                }
            }
            Self::RemoveBuilding { tile } => write!(f, "ruins at {tile}"),
        }
    }
}

fn compute(current: i64, direction: Direction, amount: Amount) -> i64 {
    match (amount, direction) {
        (Amount::Absolute(n), Direction::Increase) => current.saturating_add(i64::from(n)),
        (Amount::Absolute(n), Direction::Decrease) => current.saturating_sub(i64::from(n)),
        (Amount::Relative(p), Direction::Increase) => scale(current, 100_u32.saturating_add(p)),
        (Amount::Relative(p), Direction::Decrease) => scale(current, 100_u32.saturating_sub(p)),
    }
}

/// `value * percent / 100`, rounded half up.
fn scale(value: i64, percent: u32) -> i64 {
    value
        .saturating_mul(i64::from(percent))
        .saturating_add(50)
        .div_euclid(100)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use citadel_types::Savegame;
    use citadel_world::starting_city;

    use super::*;

    /// A target that only tracks coins and population.
    #[derive(Default)]
    struct Treasury {
        values: BTreeMap<Resource, i64>,
        ruins: Vec<TileCoord>,
    }

    impl Treasury {
        fn with(coins: i64, population: i64) -> Self {
            let mut values = BTreeMap::new();
            values.insert(Resource::Coins, coins);
            values.insert(Resource::Population, population);
            Self {
                values,
                ruins: Vec::new(),
            }
        }
    }

    impl EffectTarget for Treasury {
        fn read(&self, resource: Resource) -> Option<i64> {
            self.values.get(&resource).copied()
        }

        fn write(&mut self, resource: Resource, value: i64) -> Option<i64> {
            let slot = self.values.get_mut(&resource)?;
            *slot = value;
            Some(value)
        }

        fn replace_with_ruins(&mut self, tile: TileCoord) -> Result<Option<Building>, WorldError> {
            self.ruins.push(tile);
            Ok(None)
        }
    }

    #[test]
    fn absolute_policies() {
        let mut t = Treasury::with(100, 50);
        Effect::increase(Resource::Coins, 25).apply(&mut t).unwrap();
        Effect::decrease(Resource::Population, 20).apply(&mut t).unwrap();
        assert_eq!(t.read(Resource::Coins), Some(125));
        assert_eq!(t.read(Resource::Population), Some(30));
    }

    #[test]
    fn relative_policies_round_half_up() {
        let mut t = Treasury::with(200, 45);
        Effect::increase_relative(Resource::Coins, 10)
            .apply(&mut t)
            .unwrap();
        Effect::decrease_relative(Resource::Population, 10)
            .apply(&mut t)
            .unwrap();
        assert_eq!(t.read(Resource::Coins), Some(220));
        // 45 * 0.9 = 40.5
        assert_eq!(t.read(Resource::Population), Some(41));
    }

    #[test]
    fn relative_decrease_beyond_everything_reaches_zero() {
        let mut t = Treasury::with(200, 45);
        Effect::decrease_relative(Resource::Population, 250)
            .apply(&mut t)
            .unwrap();
        assert_eq!(t.read(Resource::Population), Some(0));
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let mut t = Treasury::with(200, 45);
        let result = Effect::decrease(Resource::Unrest, 3).apply(&mut t);
        assert!(matches!(
            result,
            Err(EffectError::UnknownAttribute {
                resource: Resource::Unrest
            })
        ));
    }

    #[test]
    fn remove_building_goes_through_the_target() {
        let mut t = Treasury::default();
        let tile = TileCoord::new(2, 3);
        Effect::remove_building(tile).apply(&mut t).unwrap();
        assert_eq!(t.ruins, vec![tile]);
    }

    #[test]
    fn city_clamps_what_effects_compute() {
        let mut city = starting_city(Savegame::new("Rivenhold")).unwrap();
        city.savegame.unrest = 5;
        Effect::decrease(Resource::Unrest, 8).apply(&mut city).unwrap();
        assert_eq!(city.savegame.unrest, 0);

        Effect::increase(Resource::Population, 10_000)
            .apply(&mut city)
            .unwrap();
        assert_eq!(city.savegame.population, city.housing_capacity());
    }

    #[test]
    fn reapplying_doubles_the_delta() {
        let mut t = Treasury::with(100, 0);
        let effect = Effect::decrease(Resource::Coins, 30);
        effect.apply(&mut t).unwrap();
        effect.apply(&mut t).unwrap();
        assert_eq!(t.read(Resource::Coins), Some(40));
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Effect::decrease(Resource::Coins, 30).to_string(), "coins -30");
        assert_eq!(
            Effect::decrease_relative(Resource::Population, 12).to_string(),
            "population -12%"
        );
        assert_eq!(
            Effect::remove_building(TileCoord::new(1, 2)).to_string(),
            "ruins at 1/2"
        );
    }
}
