//! Axis-aligned bounding boxes

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Float rectangle anchored at its top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Box of the given size at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Square grid cell `(cx, cy)` in world space
    pub fn cell(cx: i32, cy: i32, cell_size: f32) -> Self {
        Self::new(
            cx as f32 * cell_size,
            cy as f32 * cell_size,
            cell_size,
            cell_size,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Copy of this box recentered on `center`
    pub fn centered_at(mut self, center: Vec2) -> Self {
        self.set_center(center);
        self
    }

    /// Copy of this box moved by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Half-open overlap on both axes; boxes sharing an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}
