//! Default building catalogue and starting layout for a new city.
//!
//! A fresh city gets a 9x9 grassland map with a river along the western
//! border, a town hall in the centre, four houses around it and two farms
//! in the countryside. There are no walls, so the city starts unenclosed.

use citadel_types::{Building, BuildingKind, BuildingType, Savegame, Terrain};

use crate::city::City;
use crate::error::WorldError;
use crate::map::{CityMap, TileCoord};

/// Edge length of the starting map.
pub const STARTING_MAP_SIZE: u32 = 9;

/// Population a new city starts with.
pub const STARTING_POPULATION: i64 = 100;

fn building_type(name: &str, is_country: bool, is_city: bool, is_house: bool) -> BuildingType {
    BuildingType {
        name: name.to_owned(),
        kind: BuildingKind::Regular,
        is_country,
        is_city,
        is_house,
        is_wall: false,
        is_unique: false,
    }
}

/// A level 1 house.
pub fn house() -> Building {
    Building {
        name: "Small House".to_owned(),
        building_type: building_type("House", false, true, true),
        level: 1,
        taxes: 10,
        building_costs: 50,
        demolition_costs: 10,
        maintenance_costs: 2,
        housing_space: 50,
        defense_value: 0,
        prestige: 1,
    }
}

/// A countryside farm.
pub fn farm() -> Building {
    Building {
        name: "Farm".to_owned(),
        building_type: building_type("Farm", true, false, false),
        level: 1,
        taxes: 15,
        building_costs: 60,
        demolition_costs: 10,
        maintenance_costs: 5,
        housing_space: 0,
        defense_value: 0,
        prestige: 0,
    }
}

/// A city wall segment.
pub fn wall() -> Building {
    Building {
        name: "Palisade".to_owned(),
        building_type: BuildingType {
            is_wall: true,
            ..building_type("Wall", false, true, false)
        },
        level: 1,
        taxes: 0,
        building_costs: 20,
        demolition_costs: 5,
        maintenance_costs: 1,
        housing_space: 0,
        defense_value: 2,
        prestige: 0,
    }
}

/// The unique seat of government.
pub fn town_hall() -> Building {
    Building {
        name: "Town Hall".to_owned(),
        building_type: BuildingType {
            is_unique: true,
            ..building_type("Town Hall", false, true, false)
        },
        level: 1,
        taxes: 0,
        building_costs: 0,
        demolition_costs: 500,
        maintenance_costs: 10,
        housing_space: 0,
        defense_value: 5,
        prestige: 10,
    }
}

/// River terrain.
pub fn river() -> Terrain {
    Terrain {
        name: "River".to_owned(),
        is_water: true,
    }
}

/// Build the default starting city for a save.
pub fn starting_city(mut savegame: Savegame) -> Result<City, WorldError> {
    let mut map = CityMap::new(savegame.id, STARTING_MAP_SIZE, &Terrain::grassland())?;

    for y in 0..STARTING_MAP_SIZE {
        map.set_terrain(TileCoord::new(0, y), river())?;
    }

    map.place(TileCoord::new(4, 4), town_hall())?;
    for (x, y) in [(3, 4), (5, 4), (4, 3), (4, 5)] {
        map.place(TileCoord::new(x, y), house())?;
    }
    for (x, y) in [(2, 2), (6, 6)] {
        map.place(TileCoord::new(x, y), farm())?;
    }

    savegame.population = STARTING_POPULATION;
    Ok(City::new(savegame, map))
}
