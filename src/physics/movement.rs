//! Position integration

use crate::geometry::Vec2;

/// Advance a position by `velocity`, scaled by the frame's time scale
#[inline]
pub fn integrate(position: Vec2, velocity: Vec2, frame_scale: f32) -> Vec2 {
    position + velocity * frame_scale
}

/// Velocity for a movement intent: the intent's direction at `speed`
///
/// A zero intent means standing still rather than moving along +x.
pub fn intent_velocity(intent: Vec2, speed: f32) -> Vec2 {
    if intent.is_zero() {
        Vec2::ZERO
    } else {
        intent.normalized() * speed
    }
}
