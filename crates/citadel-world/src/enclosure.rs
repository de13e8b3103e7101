//! Wall enclosure detection.
//!
//! Only wall buildings block; water does not. Starting from a city building
//! (a unique one if present), flood fill every non-wall tile reachable
//! through the 8-neighbourhood. The city is enclosed when the fill never
//! touches the map edge and reaches every city building.

use std::collections::{BTreeSet, VecDeque};

use citadel_types::Building;

use crate::map::{CityMap, TileCoord};

/// Whether every city building sits inside a closed wall ring.
pub fn is_enclosed(map: &CityMap) -> bool {
    let city_tiles: Vec<(TileCoord, &Building)> = map
        .buildings()
        .filter(|(_, b)| b.building_type.is_city && !b.building_type.is_wall)
        .collect();

    let Some(start) = city_tiles
        .iter()
        .find(|(_, b)| b.building_type.is_unique)
        .or_else(|| city_tiles.first())
        .map(|(coord, _)| *coord)
    else {
        return false;
    };

    let reachable = flood_fill(map, start);

    if reachable.iter().any(|coord| map.is_edge(*coord)) {
        return false;
    }

    city_tiles
        .iter()
        .all(|(coord, _)| reachable.contains(coord))
}

fn flood_fill(map: &CityMap, start: TileCoord) -> BTreeSet<TileCoord> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        for next in map.adjacent(current) {
            if !visited.contains(&next) && !is_wall(map, next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

fn is_wall(map: &CityMap, coord: TileCoord) -> bool {
    map.tile(coord)
        .and_then(|t| t.building.as_ref())
        .is_some_and(|b| b.building_type.is_wall)
}
