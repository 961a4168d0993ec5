//! Simulation settings
//!
//! Tunables are read from a RON file; missing fields keep their defaults
//! and an unreadable file falls back to the defaults entirely.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Vec2;
use crate::lighting::{LightCone, MAX_RAYS};

/// All simulation tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport size in world units
    pub view_width: f32,
    pub view_height: f32,
    /// World units per grid cell
    pub tile_size: f32,
    /// Target frame rate of the frame loop
    pub fps: u32,
    /// Frame rate the per-frame speeds are tuned for
    pub frame_constant: f32,
    /// Cap on the per-frame time scale after a slow frame
    pub max_frame_scale: f32,
    /// Player speed in world units per tuned frame
    pub player_speed: f32,
    /// Half of the light cone's opening angle, degrees
    pub fov_half_angle_deg: f32,
    /// Angle between adjacent light rays, degrees
    pub ray_step_deg: f32,
    /// Ray length; defaults to the viewport diagonal
    pub max_ray_distance: Option<f32>,
    pub hitbox_size: Vec2,
    pub sprite_size: Vec2,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            view_width: 320.0,
            view_height: 180.0,
            tile_size: 16.0,
            fps: 60,
            frame_constant: 60.0,
            max_frame_scale: 3.0,
            player_speed: 0.7,
            fov_half_angle_deg: 45.0,
            ray_step_deg: 0.5,
            max_ray_distance: None,
            hitbox_size: Vec2::new(10.0, 10.0),
            sprite_size: Vec2::new(16.0, 16.0),
        }
    }
}

impl Settings {
    /// Default settings file location for this user
    pub fn config_path() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "tilecast", "Tilecast") {
            proj_dirs.config_dir().join("settings.ron")
        } else {
            PathBuf::from("./settings.ron")
        }
    }

    /// Load and validate settings from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = ron::from_str(&content)?;
        settings.validate()?;
        log::info!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings at {:?}, using defaults", path);
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Failed to load settings: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Write settings as pretty RON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, ron).map_err(io_err)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tile_size", self.tile_size)?;
        positive("view_width", self.view_width)?;
        positive("view_height", self.view_height)?;
        positive("frame_constant", self.frame_constant)?;
        positive("max_frame_scale", self.max_frame_scale)?;
        positive("ray_step_deg", self.ray_step_deg)?;
        positive("fov_half_angle_deg", self.fov_half_angle_deg)?;
        positive("hitbox_size.x", self.hitbox_size.x)?;
        positive("hitbox_size.y", self.hitbox_size.y)?;
        non_negative("player_speed", self.player_speed)?;
        non_negative("sprite_size.x", self.sprite_size.x)?;
        non_negative("sprite_size.y", self.sprite_size.y)?;
        if let Some(distance) = self.max_ray_distance {
            non_negative("max_ray_distance", distance)?;
        }

        if self.fps == 0 {
            return invalid("fps", "must be at least 1".to_string());
        }
        if self.fov_half_angle_deg > 180.0 {
            return invalid(
                "fov_half_angle_deg",
                format!("{} exceeds a full turn", self.fov_half_angle_deg),
            );
        }

        // Collision only looks one cell around a body
        let max_step = self.player_speed * self.max_frame_scale;
        if max_step > self.tile_size {
            return invalid(
                "player_speed",
                format!(
                    "moves {} units in a capped frame, more than one tile ({})",
                    max_step, self.tile_size
                ),
            );
        }

        let cone = self.light_cone();
        let rays = 2.0 * cone.half_angle / cone.step;
        if rays >= MAX_RAYS as f32 {
            return invalid(
                "ray_step_deg",
                format!(
                    "{} degrees needs about {:.0} rays, limit is {}",
                    self.ray_step_deg, rays, MAX_RAYS
                ),
            );
        }

        let spacing = cone.step * self.max_ray_distance();
        if spacing > self.tile_size {
            log::warn!(
                "Light rays are {:.1} units apart at full range; one-tile gaps may be missed",
                spacing
            );
        }
        Ok(())
    }

    /// Ray length, the viewport diagonal unless set explicitly
    pub fn max_ray_distance(&self) -> f32 {
        self.max_ray_distance
            .unwrap_or_else(|| self.view_width.hypot(self.view_height).ceil())
    }

    /// Time scale for a frame that took `delta`, capped after stalls
    pub fn frame_scale(&self, delta: Duration) -> f32 {
        (delta.as_secs_f32() * self.frame_constant).min(self.max_frame_scale)
    }

    /// Target duration of one frame
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    pub fn light_cone(&self) -> LightCone {
        LightCone {
            half_angle: self.fov_half_angle_deg.to_radians(),
            step: self.ray_step_deg.to_radians(),
            max_distance: self.max_ray_distance(),
        }
    }

    /// Center of the viewport, where the player starts
    pub fn view_center(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height) * 0.5
    }
}

fn invalid(field: &'static str, reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::InvalidSetting { field, reason })
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(field, format!("must be positive, got {}", value))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(field, format!("must not be negative, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        // ceil(sqrt(320^2 + 180^2))
        assert_eq!(settings.max_ray_distance(), 368.0);
    }

    #[test]
    fn test_frame_scale() {
        let settings = Settings::default();
        assert_relative_eq!(settings.frame_scale(Duration::from_millis(16)), 0.96, epsilon = 1e-5);
        assert_relative_eq!(settings.frame_scale(Duration::from_millis(50)), 3.0);
        assert_relative_eq!(settings.frame_scale(Duration::from_secs(2)), 3.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        fs::write(&path, "(tile_size: 8.0, max_ray_distance: Some(100.0))").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.tile_size, 8.0);
        assert_eq!(settings.max_ray_distance(), 100.0);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.hitbox_size, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");
        let settings = Settings {
            player_speed: 1.25,
            ray_step_deg: 1.0,
            ..Settings::default()
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_values() {
        let settings = Settings {
            tile_size: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { field: "tile_size", .. })
        ));

        let settings = Settings {
            player_speed: 10.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { field: "player_speed", .. })
        ));

        let settings = Settings {
            ray_step_deg: 1.0e-6,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { field: "ray_step_deg", .. })
        ));

        let settings = Settings {
            fps: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ron");
        assert_eq!(Settings::load_or_default(&missing), Settings::default());

        let broken = dir.path().join("broken.ron");
        fs::write(&broken, "(tile_size: ").unwrap();
        assert_eq!(Settings::load_or_default(&broken), Settings::default());
    }

    #[test]
    fn test_light_cone() {
        let cone = Settings::default().light_cone();
        assert_relative_eq!(cone.half_angle, std::f32::consts::FRAC_PI_4);
        assert_relative_eq!(cone.step, 0.5_f32.to_radians());
        assert_eq!(cone.max_distance, 368.0);
    }
}
