//! The square tile grid a city is built on.
//!
//! Tiles are stored row-major, so the tile at `(x, y)` lives at index
//! `y * size + x`. Adjacency is the 8-neighbourhood (diagonals included),
//! clipped at the map border.

use serde::{Deserialize, Serialize};

use citadel_types::{Building, SavegameId, Terrain, Tile};

use crate::error::WorldError;

/// Position of a tile on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column, starting at 0.
    pub x: u32,
    /// Row, starting at 0.
    pub y: u32,
}

impl TileCoord {
    /// Create a coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

impl From<&Tile> for TileCoord {
    fn from(tile: &Tile) -> Self {
        Self::new(tile.x, tile.y)
    }
}

/// A square grid of tiles belonging to one savegame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityMap {
    /// Edge length.
    size: u32,
    /// Row-major tiles, `size * size` entries.
    tiles: Vec<Tile>,
}

impl CityMap {
    /// Create a map where every tile has the given terrain and no building.
    pub fn new(savegame_id: SavegameId, size: u32, terrain: &Terrain) -> Result<Self, WorldError> {
        if size == 0 {
            return Err(WorldError::EmptyMap);
        }
        let tiles = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .map(|(x, y)| Tile {
                savegame_id,
                x,
                y,
                terrain: terrain.clone(),
                building: None,
            })
            .collect();
        Ok(Self { size, tiles })
    }

    /// Edge length of the map.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile.
    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.index(coord).and_then(|i| self.tiles.get(i))
    }

    /// Look up a tile mutably.
    pub fn tile_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.index(coord).and_then(|i| self.tiles.get_mut(i))
    }

    /// Put a building on a tile, returning the previous occupant.
    pub fn place(
        &mut self,
        coord: TileCoord,
        building: Building,
    ) -> Result<Option<Building>, WorldError> {
        let size = self.size;
        let tile = self.tile_mut(coord).ok_or(WorldError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            size,
        })?;
        Ok(tile.building.replace(building))
    }

    /// Change the terrain of a tile.
    pub fn set_terrain(&mut self, coord: TileCoord, terrain: Terrain) -> Result<(), WorldError> {
        let size = self.size;
        let tile = self.tile_mut(coord).ok_or(WorldError::OutOfBounds {
            x: coord.x,
            y: coord.y,
            size,
        })?;
        tile.terrain = terrain;
        Ok(())
    }

    /// Whether the coordinate lies on the outermost ring of the map.
    pub const fn is_edge(&self, coord: TileCoord) -> bool {
        let max = self.size.saturating_sub(1);
        coord.x == 0 || coord.y == 0 || coord.x == max || coord.y == max
    }

    /// In-bounds neighbours of a coordinate, diagonals included.
    pub fn adjacent(&self, coord: TileCoord) -> Vec<TileCoord> {
        let max = self.size.saturating_sub(1);
        let min_x = coord.x.saturating_sub(1);
        let max_x = coord.x.saturating_add(1).min(max);
        let min_y = coord.y.saturating_sub(1);
        let max_y = coord.y.saturating_add(1).min(max);

        (min_x..=max_x)
            .flat_map(|x| (min_y..=max_y).map(move |y| TileCoord::new(x, y)))
            .filter(|c| *c != coord)
            .collect()
    }

    /// In-bounds orthogonal neighbours (up, down, left, right).
    pub fn orthogonal(&self, coord: TileCoord) -> Vec<TileCoord> {
        let mut out = Vec::with_capacity(4);
        if let Some(y) = coord.y.checked_add(1).filter(|y| *y < self.size) {
            out.push(TileCoord::new(coord.x, y));
        }
        if let Some(y) = coord.y.checked_sub(1) {
            out.push(TileCoord::new(coord.x, y));
        }
        if let Some(x) = coord.x.checked_add(1).filter(|x| *x < self.size) {
            out.push(TileCoord::new(x, coord.y));
        }
        if let Some(x) = coord.x.checked_sub(1) {
            out.push(TileCoord::new(x, coord.y));
        }
        out
    }

    /// Every occupied tile with its building, row-major.
    pub fn buildings(&self) -> impl Iterator<Item = (TileCoord, &Building)> {
        self.tiles
            .iter()
            .filter_map(|tile| tile.building.as_ref().map(|b| (TileCoord::from(tile), b)))
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.x >= self.size || coord.y >= self.size {
            return None;
        }
        let row = usize::try_from(coord.y).ok()?;
        let col = usize::try_from(coord.x).ok()?;
        let width = usize::try_from(self.size).ok()?;
        row.checked_mul(width)?.checked_add(col)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn map(size: u32) -> CityMap {
        CityMap::new(SavegameId::new(), size, &Terrain::grassland()).unwrap()
    }

    #[test]
    fn new_map_is_filled_row_major() {
        let m = map(3);
        assert_eq!(m.tiles().len(), 9);
        let tile = m.tile(TileCoord::new(2, 1)).unwrap();
        assert_eq!((tile.x, tile.y), (2, 1));
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = CityMap::new(SavegameId::new(), 0, &Terrain::grassland());
        assert_eq!(result, Err(WorldError::EmptyMap));
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let m = map(3);
        assert!(m.tile(TileCoord::new(3, 0)).is_none());
    }

    #[test]
    fn corner_has_three_neighbours() {
        let m = map(5);
        assert_eq!(m.adjacent(TileCoord::new(0, 0)).len(), 3);
        assert_eq!(m.adjacent(TileCoord::new(2, 2)).len(), 8);
        assert_eq!(m.orthogonal(TileCoord::new(0, 0)).len(), 2);
    }

    #[test]
    fn edge_detection() {
        let m = map(5);
        assert!(m.is_edge(TileCoord::new(0, 3)));
        assert!(m.is_edge(TileCoord::new(4, 1)));
        assert!(!m.is_edge(TileCoord::new(2, 2)));
    }

    #[test]
    fn place_returns_previous_occupant() {
        let mut m = map(3);
        let coord = TileCoord::new(1, 1);
        assert!(m.place(coord, Building::ruins()).unwrap().is_none());
        assert!(m.place(coord, Building::ruins()).unwrap().is_some());
        assert_eq!(m.buildings().count(), 1);
    }
}
