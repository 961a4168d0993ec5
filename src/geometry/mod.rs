//! Geometry primitives
//!
//! World-space vectors, axis-aligned boxes and grid coordinate conversion.

pub mod rect;
pub mod vector;

pub use rect::Aabb;
pub use vector::Vec2;

/// Convert a world coordinate to a cell index (floor division)
#[inline]
pub fn world_to_cell(value: f32, cell_size: f32) -> i32 {
    (value / cell_size).floor() as i32
}
