//! Tilecast - grid raycast lighting and tile collision
//!
//! A top-down 2D simulation core: a light cone is cast from the player
//! through a tile map, and bodies slide along walls instead of passing
//! through them.

pub mod config;
pub mod ecs;
pub mod error;
pub mod game;
pub mod geometry;
pub mod lighting;
pub mod physics;
pub mod world;

// Re-export commonly used types
pub use config::Settings;
pub use error::{ConfigError, Error, InputError, Result};
pub use game::{FrameInput, FrameOutput, Simulation};
pub use geometry::{Aabb, Vec2};
pub use lighting::{cast_ray, cast_ray_fan, LightCone, RayFan, ShadowPolygon};
pub use physics::resolve;
pub use world::{LevelMap, MapHandle, OccupancyGrid};
