//! Entity Component System module
//!
//! Components for moving bodies and the systems that run them each frame.

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::{apply_intent, cast_light, integrate_positions, resolve_collisions};
