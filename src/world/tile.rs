//! Tile definitions
//!
//! Tile kinds and the glyph legend used by level files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// A single placed tile of a level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub tile_type: TileType,
    /// Top-left corner in world units
    pub position: Vec2,
}

impl Tile {
    pub fn new(tile_type: TileType, position: Vec2) -> Self {
        Self {
            tile_type,
            position,
        }
    }

    pub fn is_solid(&self) -> bool {
        self.tile_type.is_solid()
    }
}

/// Types of tiles in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
}

impl TileType {
    /// Solid tiles block both movement and sight
    pub fn is_solid(&self) -> bool {
        matches!(self, TileType::Wall)
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => '.',
            TileType::Wall => 'x',
        }
    }
}

/// Glyph to tile mapping for level files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLegend {
    glyphs: HashMap<char, TileType>,
}

impl TileLegend {
    pub fn new() -> Self {
        Self {
            glyphs: HashMap::new(),
        }
    }

    pub fn with(mut self, glyph: char, tile_type: TileType) -> Self {
        self.glyphs.insert(glyph, tile_type);
        self
    }

    pub fn lookup(&self, glyph: char) -> Option<TileType> {
        self.glyphs.get(&glyph).copied()
    }
}

impl Default for TileLegend {
    fn default() -> Self {
        Self::new()
            .with(TileType::Floor.glyph(), TileType::Floor)
            .with(TileType::Wall.glyph(), TileType::Wall)
    }
}
