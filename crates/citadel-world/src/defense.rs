//! Defense of a city.
//!
//! An open city has no defense at all. An enclosed one sums the defense of
//! every building and earns a bonus for each smooth wall segment: a wall
//! tile with exactly two orthogonal wall neighbours (a straight run or a
//! right-angle corner).

use crate::enclosure;
use crate::map::{CityMap, TileCoord};

/// Bonus per smooth wall tile.
pub const SMOOTH_WALL_BONUS: i64 = 5;

/// Total defense, zero unless the walls enclose the city.
pub fn total(map: &CityMap) -> i64 {
    if !enclosure::is_enclosed(map) {
        return 0;
    }
    base(map).saturating_add(shape_bonus(map))
}

/// Sum of the buildings' defense values.
pub fn base(map: &CityMap) -> i64 {
    map.buildings().map(|(_, b)| i64::from(b.defense_value)).sum()
}

/// Bonus for well-formed walls.
pub fn shape_bonus(map: &CityMap) -> i64 {
    let smooth = map
        .buildings()
        .filter(|(_, b)| b.building_type.is_wall)
        .filter(|(coord, _)| wall_neighbours(map, *coord) == 2)
        .count();
    i64::try_from(smooth)
        .unwrap_or(i64::MAX)
        .saturating_mul(SMOOTH_WALL_BONUS)
}

fn wall_neighbours(map: &CityMap, coord: TileCoord) -> usize {
    map.orthogonal(coord)
        .into_iter()
        .filter(|c| {
            map.tile(*c)
                .and_then(|t| t.building.as_ref())
                .is_some_and(|b| b.building_type.is_wall)
        })
        .count()
}
