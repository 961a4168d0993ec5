//! ECS Systems
//!
//! Per-frame logic over entities. Each system takes what it needs as
//! arguments and returns what the next one needs; nothing is stashed in
//! shared state between them.

use hecs::{Entity, World};

use super::components::{Hitbox, Position, Sprite, Velocity};
use crate::error::{ensure_finite, Result};
use crate::geometry::Vec2;
use crate::lighting::{LightCone, ShadowPolygon};
use crate::physics::{integrate, intent_velocity, resolve};
use crate::world::OccupancyGrid;

/// Turn a movement intent and cursor into the player's velocity and aim
///
/// Returns the aim angle in radians, pointing from the player's center
/// at `cursor`; a cursor right on the center aims along +x.
pub fn apply_intent(
    world: &mut World,
    player: Entity,
    movement: Vec2,
    cursor: Vec2,
    speed: f32,
) -> Result<f32> {
    ensure_finite(movement.x, "movement x")?;
    ensure_finite(movement.y, "movement y")?;
    ensure_finite(cursor.x, "cursor x")?;
    ensure_finite(cursor.y, "cursor y")?;

    let center = {
        let position = world.get::<&Position>(player)?;
        let sprite = world.get::<&Sprite>(player)?;
        sprite.center(&position)
    };

    world.get::<&mut Velocity>(player)?.0 = intent_velocity(movement, speed);

    Ok((cursor - center).normalized().angle())
}

/// Clear velocity components that would move bodies into walls
///
/// Each body is checked against the distance it will cover this frame.
/// Returns how many bodies were blocked on at least one axis.
pub fn resolve_collisions(
    world: &mut World,
    grid: &OccupancyGrid,
    frame_scale: f32,
) -> Result<usize> {
    let mut blocked = 0;

    for (_entity, (position, velocity, hitbox, sprite)) in
        world.query_mut::<(&Position, &mut Velocity, &Hitbox, &Sprite)>()
    {
        let displacement = velocity.0 * frame_scale;
        let resolved = resolve(position.0, displacement, &hitbox.aabb(), sprite.size, grid)?;

        let mut hit = false;
        if displacement.x != 0.0 && resolved.x == 0.0 {
            velocity.0.x = 0.0;
            hit = true;
        }
        if displacement.y != 0.0 && resolved.y == 0.0 {
            velocity.0.y = 0.0;
            hit = true;
        }
        if hit {
            blocked += 1;
        }
    }

    Ok(blocked)
}

/// Move every body by its velocity
pub fn integrate_positions(world: &mut World, frame_scale: f32) {
    for (_entity, (position, velocity)) in world.query_mut::<(&mut Position, &Velocity)>() {
        position.0 = integrate(position.0, velocity.0, frame_scale);
    }
}

/// Build the light polygon for an entity aiming at `aim`
pub fn cast_light(
    world: &World,
    entity: Entity,
    grid: &OccupancyGrid,
    aim: f32,
    cone: &LightCone,
) -> Result<ShadowPolygon> {
    let center = {
        let position = world.get::<&Position>(entity)?;
        let sprite = world.get::<&Sprite>(entity)?;
        sprite.center(&position)
    };
    Ok(ShadowPolygon::cast(center, aim, cone, grid)?)
}
