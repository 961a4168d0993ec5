//! Lighting
//!
//! Grid raycasting and the visibility polygon built from it.

pub mod raycast;
pub mod shadow;

pub use raycast::{cast_ray, cast_ray_fan, RayFan, RaySweep, MAX_RAYS};
pub use shadow::{LightCone, ShadowPolygon};
