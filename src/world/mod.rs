//! World module
//!
//! Contains the occupancy grid, tiles and level loading.

pub mod grid;
pub mod handle;
pub mod map;
pub mod tile;

pub use grid::OccupancyGrid;
pub use handle::MapHandle;
pub use map::LevelMap;
pub use tile::{Tile, TileLegend, TileType};
