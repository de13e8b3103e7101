//! Housing capacity of a city.

use crate::map::CityMap;

/// Total inhabitants the city's buildings can house.
pub fn capacity(map: &CityMap) -> i64 {
    map.buildings().map(|(_, b)| i64::from(b.housing_space)).sum()
}
