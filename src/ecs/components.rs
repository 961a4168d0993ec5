//! ECS Components
//!
//! Components used by the simulation's entity-component system.

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Vec2};

// ============================================================================
// Position & Movement
// ============================================================================

/// Top-left anchor of an entity's sprite, world units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// World units moved per tuned frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity(pub Vec2);

impl Velocity {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Collision box, centered on the sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_size(self.width, self.height)
    }
}

/// Sprite extent; only its size matters to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub size: Vec2,
}

impl Sprite {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Center of the sprite anchored at `position`
    pub fn center(&self, position: &Position) -> Vec2 {
        position.0 + self.size * 0.5
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Marks an entity as the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;
