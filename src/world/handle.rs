//! Shared map handle
//!
//! Holds the active occupancy grid behind an `Arc` so a level can be hot
//! swapped between frames without touching a grid that is still in use.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use super::grid::OccupancyGrid;
use super::map::LevelMap;
use super::tile::TileLegend;
use crate::error::ConfigError;

/// Swappable reference to the current grid
#[derive(Debug)]
pub struct MapHandle {
    current: RwLock<Arc<OccupancyGrid>>,
}

impl MapHandle {
    pub fn new(grid: OccupancyGrid) -> Self {
        Self {
            current: RwLock::new(Arc::new(grid)),
        }
    }

    /// Grid to use for a whole frame; later swaps do not affect it
    pub fn snapshot(&self) -> Arc<OccupancyGrid> {
        Arc::clone(&self.current.read())
    }

    /// Install a new grid, returning the previous one
    pub fn replace(&self, grid: OccupancyGrid) -> Arc<OccupancyGrid> {
        let next = Arc::new(grid);
        log::debug!("Swapping in {}x{} map", next.width(), next.height());
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Load a level file and swap it in; the old grid stays active on error
    pub fn reload(&self, path: &Path, legend: &TileLegend) -> Result<(), ConfigError> {
        let cell_size = self.current.read().cell_size();
        let level = LevelMap::load(path, cell_size, legend)?;
        self.replace(level.into_grid());
        log::info!("Reloaded map from {:?}", path);
        Ok(())
    }
}

impl From<OccupancyGrid> for MapHandle {
    fn from(grid: OccupancyGrid) -> Self {
        Self::new(grid)
    }
}
