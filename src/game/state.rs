//! Simulation state
//!
//! Owns the ECS world and runs one frame at a time. Everything a frame
//! produces is handed back in a [`FrameOutput`].

use std::sync::Arc;
use std::time::Duration;

use hecs::{Entity, World};

use super::input::FrameInput;
use crate::config::Settings;
use crate::ecs::{systems, Hitbox, Player, Position, Sprite, Velocity};
use crate::error::{ConfigError, InputError, Result};
use crate::geometry::Vec2;
use crate::lighting::ShadowPolygon;
use crate::world::{LevelMap, MapHandle};

/// Result of one simulation frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Aim angle in radians
    pub aim_angle: f32,
    /// Light polygon around the player
    pub shadow: ShadowPolygon,
    /// Bodies stopped by a wall on at least one axis
    pub blocked: usize,
}

/// The running simulation
pub struct Simulation {
    world: World,
    map: Arc<MapHandle>,
    settings: Settings,
    player: Entity,
    frame: u64,
}

impl Simulation {
    /// Validate settings against the level and spawn the player
    pub fn new(settings: Settings, level: LevelMap) -> Result<Self, ConfigError> {
        settings.validate()?;

        let cell_size = level.grid().cell_size();
        if cell_size != settings.tile_size {
            return Err(ConfigError::InvalidSetting {
                field: "tile_size",
                reason: format!(
                    "level uses {} unit cells, settings say {}",
                    cell_size, settings.tile_size
                ),
            });
        }

        let spawn = level
            .spawn_point(settings.view_center(), settings.sprite_size)
            .ok_or(ConfigError::NoFreeCell)?;

        let mut world = World::new();
        let player = world.spawn((
            Player,
            Position(spawn),
            Velocity::default(),
            Hitbox::new(settings.hitbox_size.x, settings.hitbox_size.y),
            Sprite::new(settings.sprite_size.x, settings.sprite_size.y),
        ));
        log::info!("Player spawned at ({:.1}, {:.1})", spawn.x, spawn.y);

        Ok(Self {
            world,
            map: Arc::new(MapHandle::new(level.into_grid())),
            settings,
            player,
            frame: 0,
        })
    }

    /// Add a non-player body that moves at a constant velocity
    pub fn spawn_body(&mut self, position: Vec2, velocity: Vec2) -> Result<Entity, InputError> {
        if !position.is_finite() || !velocity.is_finite() {
            return Err(InputError::NonFinite { what: "body" });
        }
        let reach = velocity * self.settings.max_frame_scale;
        if reach.x.abs() > self.settings.tile_size || reach.y.abs() > self.settings.tile_size {
            return Err(InputError::TooFast {
                vx: velocity.x,
                vy: velocity.y,
                cell_size: self.settings.tile_size,
            });
        }

        let size = self.settings.sprite_size;
        let hitbox = self.settings.hitbox_size;
        Ok(self.world.spawn((
            Position(position),
            Velocity(velocity),
            Hitbox::new(hitbox.x, hitbox.y),
            Sprite::new(size.x, size.y),
        )))
    }

    /// Run one frame that took `delta` of wall time
    ///
    /// Order: player intent, collision for every body, integration, then
    /// lighting from the player's new position. The grid is snapshotted
    /// once so a swap mid-frame takes effect on the next one.
    pub fn step(&mut self, input: &FrameInput, delta: Duration) -> Result<FrameOutput> {
        let grid = self.map.snapshot();
        let frame_scale = self.settings.frame_scale(delta);

        let aim_angle = systems::apply_intent(
            &mut self.world,
            self.player,
            input.movement,
            input.cursor,
            self.settings.player_speed,
        )?;
        let blocked = systems::resolve_collisions(&mut self.world, &grid, frame_scale)?;
        systems::integrate_positions(&mut self.world, frame_scale);
        let shadow = systems::cast_light(
            &self.world,
            self.player,
            &grid,
            aim_angle,
            &self.settings.light_cone(),
        )?;

        self.frame += 1;
        log::debug!(
            "Frame {}: scale {:.2}, aim {:.2}, {} rays, {} blocked",
            self.frame,
            frame_scale,
            aim_angle,
            shadow.hits().len(),
            blocked
        );

        Ok(FrameOutput {
            frame: self.frame,
            aim_angle,
            shadow,
            blocked,
        })
    }

    /// Shared handle for swapping the level between frames
    pub fn map(&self) -> Arc<MapHandle> {
        Arc::clone(&self.map)
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    /// Top-left anchor of the player sprite
    pub fn player_position(&self) -> Result<Vec2> {
        Ok(self.world.get::<&Position>(self.player)?.0)
    }

    /// Center of the player sprite, where the light comes from
    pub fn player_center(&self) -> Result<Vec2> {
        let position = self.world.get::<&Position>(self.player)?;
        let sprite = self.world.get::<&Sprite>(self.player)?;
        Ok(sprite.center(&position))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
