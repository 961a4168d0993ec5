//! Occupancy grid
//!
//! The boolean tile grid shared by collision and raycasting. Cells outside
//! the grid always report as occupied.

use crate::error::ConfigError;
use crate::geometry::{world_to_cell, Vec2};

/// Immutable row-major grid of blocking cells
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
    cell_size: f32,
}

impl OccupancyGrid {
    /// Build a grid from `rows[row][col]`, rejecting empty or ragged input
    pub fn from_rows<R>(rows: &[R], cell_size: f32) -> Result<Self, ConfigError>
    where
        R: AsRef<[bool]>,
    {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(ConfigError::InvalidCellSize(cell_size));
        }

        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, data) in rows.iter().enumerate() {
            let data = data.as_ref();
            if data.len() != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found: data.len(),
                });
            }
            cells.extend_from_slice(data);
        }

        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
            cell_size,
        })
    }

    /// Build a grid from integer rows where any non-zero value blocks
    pub fn from_bits<R>(rows: &[R], cell_size: f32) -> Result<Self, ConfigError>
    where
        R: AsRef<[u8]>,
    {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.as_ref().iter().map(|&bit| bit != 0).collect())
            .collect();
        Self::from_rows(&rows, cell_size)
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Size of the mapped area in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    #[inline]
    pub fn in_bounds(&self, cx: i32, cy: i32) -> bool {
        cx >= 0 && cx < self.width && cy >= 0 && cy < self.height
    }

    #[inline]
    fn xy_to_idx(&self, cx: i32, cy: i32) -> usize {
        (cy * self.width + cx) as usize
    }

    /// Cell value, or `None` outside the grid
    pub fn get(&self, cx: i32, cy: i32) -> Option<bool> {
        if self.in_bounds(cx, cy) {
            Some(self.cells[self.xy_to_idx(cx, cy)])
        } else {
            None
        }
    }

    /// Whether the cell blocks movement and sight; out of bounds blocks
    #[inline]
    pub fn collides(&self, cx: i32, cy: i32) -> bool {
        self.get(cx, cy).unwrap_or(true)
    }

    /// Cell containing a world-space point
    #[inline]
    pub fn cell_of(&self, point: Vec2) -> (i32, i32) {
        (
            world_to_cell(point.x, self.cell_size),
            world_to_cell(point.y, self.cell_size),
        )
    }

    /// Whether the cell containing `point` blocks
    pub fn collides_at(&self, point: Vec2) -> bool {
        let (cx, cy) = self.cell_of(point);
        self.collides(cx, cy)
    }

    /// World-space center of a cell
    pub fn cell_center(&self, cx: i32, cy: i32) -> Vec2 {
        Vec2::new(
            (cx as f32 + 0.5) * self.cell_size,
            (cy as f32 + 0.5) * self.cell_size,
        )
    }

    /// All free cells in row-major order
    pub fn free_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, blocked)| !**blocked)
            .map(move |(idx, _)| {
                let idx = idx as i32;
                (idx % self.width, idx / self.width)
            })
    }
}
