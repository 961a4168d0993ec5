//! Visibility polygon
//!
//! The lit area in front of an entity: its center followed by the hits of
//! a ray fan spread around the aim direction.

use super::raycast::cast_ray_fan;
use crate::error::InputError;
use crate::geometry::Vec2;
use crate::world::OccupancyGrid;

/// Aim cone used to build a shadow polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightCone {
    /// Half of the cone's opening angle, radians
    pub half_angle: f32,
    /// Angle between adjacent rays, radians
    pub step: f32,
    pub max_distance: f32,
}

/// Polygon vertices fanned out from the origin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowPolygon {
    vertices: Vec<Vec2>,
}

impl ShadowPolygon {
    /// Cast the cone centered on `aim` from `center`
    pub fn cast(
        center: Vec2,
        aim: f32,
        cone: &LightCone,
        grid: &OccupancyGrid,
    ) -> Result<Self, InputError> {
        let fan = cast_ray_fan(
            center,
            aim - cone.half_angle,
            aim + cone.half_angle,
            cone.step,
            cone.max_distance,
            grid,
        )?;

        let mut vertices = Vec::with_capacity(fan.len().saturating_add(1));
        vertices.push(center);
        vertices.extend(fan.iter());
        Ok(Self { vertices })
    }

    /// Origin followed by ray hits in ascending angle order
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn origin(&self) -> Option<Vec2> {
        self.vertices.first().copied()
    }

    /// Ray hits without the origin
    pub fn hits(&self) -> &[Vec2] {
        self.vertices.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Longest distance any ray travelled
    pub fn reach(&self) -> f32 {
        match self.origin() {
            Some(origin) => self
                .hits()
                .iter()
                .map(|hit| origin.distance(hit))
                .fold(0.0, f32::max),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn cone() -> LightCone {
        LightCone {
            half_angle: FRAC_PI_4,
            step: 0.5_f32.to_radians(),
            max_distance: 368.0,
        }
    }

    #[test]
    fn test_polygon_starts_at_center() {
        let grid = OccupancyGrid::from_rows(&vec![vec![false; 8]; 8], 16.0).unwrap();
        let center = Vec2::new(64.0, 64.0);
        let polygon = ShadowPolygon::cast(center, 0.0, &cone(), &grid).unwrap();

        assert_eq!(polygon.origin(), Some(center));
        // 90 degree cone at half-degree steps
        assert_eq!(polygon.hits().len(), 181);
        assert_eq!(polygon.len(), 182);
    }

    #[test]
    fn test_polygon_bounded_by_walls() {
        // Enclosed 3x3 room: the only open cell is (1, 1)
        let grid = OccupancyGrid::from_bits(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]], 16.0).unwrap();
        let center = Vec2::new(24.0, 24.0);
        let polygon = ShadowPolygon::cast(center, 1.0, &cone(), &grid).unwrap();

        assert!(polygon.reach() <= 8.0 * std::f32::consts::SQRT_2 + 1e-3);
        for hit in polygon.hits() {
            assert!(hit.x >= 16.0 - 1e-3 && hit.x <= 32.0 + 1e-3);
            assert!(hit.y >= 16.0 - 1e-3 && hit.y <= 32.0 + 1e-3);
        }
    }

    #[test]
    fn test_bad_cone_rejected() {
        let grid = OccupancyGrid::from_bits(&[[0u8]], 16.0).unwrap();
        let bad = LightCone { step: -1.0, ..cone() };
        assert!(ShadowPolygon::cast(Vec2::new(8.0, 8.0), 0.0, &bad, &grid).is_err());
    }

    #[test]
    fn test_empty_polygon() {
        let polygon = ShadowPolygon::default();
        assert!(polygon.is_empty());
        assert!(polygon.hits().is_empty());
        assert_eq!(polygon.reach(), 0.0);
    }
}
