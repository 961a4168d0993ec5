//! Per-frame input

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// What the player asks for this frame
///
/// `movement` is a direction, not a speed; it is normalized before use.
/// `cursor` is in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub movement: Vec2,
    pub cursor: Vec2,
}

impl FrameInput {
    pub fn new(movement: Vec2, cursor: Vec2) -> Self {
        Self { movement, cursor }
    }

    /// Build movement from held direction keys; y grows downwards
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool, cursor: Vec2) -> Self {
        let axis = |neg: bool, pos: bool| pos as i8 as f32 - neg as i8 as f32;
        Self {
            movement: Vec2::new(axis(left, right), axis(up, down)),
            cursor,
        }
    }
}
