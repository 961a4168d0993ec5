//! Physics
//!
//! Tile collision and movement integration.

pub mod collision;
pub mod movement;

pub use collision::{blocking_neighbours, resolve};
pub use movement::{integrate, intent_velocity};
