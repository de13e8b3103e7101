//! Prestige of a city: the sum of its buildings' prestige.

use crate::map::CityMap;

/// Total prestige contributed by every building on the map.
pub fn total(map: &CityMap) -> i64 {
    map.buildings().map(|(_, b)| i64::from(b.prestige)).sum()
}
