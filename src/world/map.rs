//! Level map data
//!
//! Loads a level from its JSON description and derives the occupancy grid
//! used by collision and lighting.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::grid::OccupancyGrid;
use super::tile::{Tile, TileLegend, TileType};
use crate::error::ConfigError;
use crate::geometry::Vec2;

/// On-disk level format: one string per row, spaces ignored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFile {
    pub map: Vec<String>,
}

/// A loaded level
#[derive(Debug, Clone)]
pub struct LevelMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
    grid: OccupancyGrid,
}

impl LevelMap {
    /// Parse a level from JSON text
    pub fn parse(json: &str, tile_size: f32, legend: &TileLegend) -> Result<Self, ConfigError> {
        let file: MapFile = serde_json::from_str(json)?;
        Self::from_rows(&file.map, tile_size, legend)
    }

    /// Load a level from a JSON file
    pub fn load(path: &Path, tile_size: f32, legend: &TileLegend) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&json, tile_size, legend)?;
        log::info!(
            "Loaded level {:?} ({}x{} tiles)",
            path,
            map.width,
            map.height
        );
        Ok(map)
    }

    /// Build a level from glyph rows
    pub fn from_rows<S>(
        rows: &[S],
        tile_size: f32,
        legend: &TileLegend,
    ) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
    {
        let mut tiles = Vec::new();
        let mut collision = Vec::with_capacity(rows.len());

        for (row, line) in rows.iter().enumerate() {
            let mut solid_row = Vec::new();
            for (col, glyph) in line.as_ref().chars().filter(|c| *c != ' ').enumerate() {
                let tile_type = legend
                    .lookup(glyph)
                    .ok_or(ConfigError::UnknownGlyph { row, col, glyph })?;
                let position = Vec2::new(col as f32 * tile_size, row as f32 * tile_size);
                tiles.push(Tile::new(tile_type, position));
                solid_row.push(tile_type.is_solid());
            }
            collision.push(solid_row);
        }

        let grid = OccupancyGrid::from_rows(&collision, tile_size)?;
        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            tiles,
            grid,
        })
    }

    /// Every tile in row-major order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Consume the level, keeping only its collision grid
    pub fn into_grid(self) -> OccupancyGrid {
        self.grid
    }

    /// Get tile at cell position
    pub fn get_tile(&self, cx: i32, cy: i32) -> Option<&Tile> {
        if self.grid.in_bounds(cx, cy) {
            self.tiles.get((cy * self.width + cx) as usize)
        } else {
            None
        }
    }

    /// Spawn point for a body of `size`, top-left anchored
    ///
    /// Prefers centering the body on `preferred` (the middle of the view
    /// for the player); falls back to the first free cell when that spot
    /// is inside a wall.
    pub fn spawn_point(&self, preferred: Vec2, size: Vec2) -> Option<Vec2> {
        let half = size * 0.5;
        if !self.grid.collides_at(preferred) {
            return Some(preferred - half);
        }
        self.grid
            .free_cells()
            .next()
            .map(|(cx, cy)| self.grid.cell_center(cx, cy) - half)
    }

    /// Small walled test level for development
    pub fn test_map(tile_size: f32) -> Result<Self, ConfigError> {
        let rows = [
            "x x x x x x x x x x",
            "x . . . . . . . . x",
            "x . . . . . x . . x",
            "x . . x . . x . . x",
            "x . . x . . . . . x",
            "x . . . . . . x x x",
            "x x x x x x x x x x",
        ];
        Self::from_rows(&rows, tile_size, &TileLegend::default())
    }

    /// Count of solid tiles
    pub fn wall_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.tile_type == TileType::Wall)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_ignores_spaces() {
        let json = r#"{ "map": ["x x x", "x . x", "x x x"] }"#;
        let map = LevelMap::parse(json, 16.0, &TileLegend::default()).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 3);
        assert_eq!(map.wall_count(), 8);
        assert!(!map.grid().collides(1, 1));
        assert!(map.grid().collides(0, 1));
        assert_eq!(map.get_tile(1, 1).unwrap().position, Vec2::new(16.0, 16.0));
        assert_eq!(map.tiles().len(), 9);
    }

    #[test]
    fn test_unknown_glyph() {
        let json = r#"{ "map": ["x?x"] }"#;
        let err = LevelMap::parse(json, 16.0, &TileLegend::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownGlyph { row: 0, col: 1, glyph: '?' }
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let json = r#"{ "map": ["xxx", "x."] }"#;
        let err = LevelMap::parse(json, 16.0, &TileLegend::default()).unwrap_err();
        assert!(matches!(err, ConfigError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn test_bad_json() {
        let err = LevelMap::parse("{ map: 1 }", 16.0, &TileLegend::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MapFormat(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "map": ["x x", ". ."] }}"#).unwrap();
        let map = LevelMap::load(file.path(), 8.0, &TileLegend::default()).unwrap();
        assert_eq!(map.grid().cell_size(), 8.0);
        assert!(map.grid().collides(0, 0));
        assert!(!map.grid().collides(1, 1));
    }

    #[test]
    fn test_missing_file() {
        let err = LevelMap::load(Path::new("/nonexistent/level.json"), 16.0, &TileLegend::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_spawn_point() {
        let map = LevelMap::test_map(16.0).unwrap();
        let size = Vec2::new(16.0, 16.0);

        // Open floor: centered on the preferred point
        let spawn = map.spawn_point(Vec2::new(40.0, 40.0), size).unwrap();
        assert_eq!(spawn, Vec2::new(32.0, 32.0));

        // Inside a wall: first free cell (1, 1)
        let spawn = map.spawn_point(Vec2::new(4.0, 4.0), size).unwrap();
        assert_eq!(spawn, Vec2::new(16.0, 16.0));
    }
}
