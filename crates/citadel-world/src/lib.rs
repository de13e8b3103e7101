//! City map, resources, and derived world queries for the Citadel simulation.
//!
//! The event engine treats everything here as an opaque collaborator: it
//! mutates resources through [`City::set_resource`], removes buildings
//! through [`City::replace_with_ruins`], and asks the map for derived
//! scores when event content needs them.
//!
//! # Modules
//!
//! - [`city`] -- The [`City`] aggregate and its resource clamping rules.
//! - [`map`] -- Square tile grid with adjacency and edge queries.
//! - [`housing`] -- Housing capacity.
//! - [`prestige`] -- Aggregate prestige.
//! - [`defense`] -- Aggregate defense, gated on wall enclosure, with the
//!   smooth-wall shape bonus.
//! - [`enclosure`] -- Flood-fill wall enclosure check.
//! - [`economy`] -- Taxes against maintenance.
//! - [`starting_city`] -- Default building catalogue and starting layout.
//! - [`error`] -- Error types for map operations.

pub mod city;
pub mod defense;
pub mod economy;
pub mod enclosure;
pub mod error;
pub mod housing;
pub mod map;
pub mod prestige;
pub mod starting_city;

// Re-export primary types at crate root.
pub use city::City;
pub use economy::Balance;
pub use error::WorldError;
pub use map::{CityMap, TileCoord};
pub use starting_city::{STARTING_MAP_SIZE, STARTING_POPULATION, starting_city};
