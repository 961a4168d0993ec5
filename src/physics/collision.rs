//! Tile collision
//!
//! Axis-separated collision against the occupancy grid. The horizontal
//! and vertical parts of a velocity are tested independently against the
//! blocking cells around the body, so a body pressed into a wall keeps
//! sliding along it instead of stopping dead.
//!
//! Only the 8 cells around the body's next center are considered. That
//! holds as long as a body moves at most one cell per tick on each axis;
//! faster velocities are rejected rather than silently tunnelling.

use crate::error::{ensure_finite, InputError};
use crate::geometry::{Aabb, Vec2};
use crate::world::OccupancyGrid;

/// Compass neighbours of a cell, clockwise from north-west
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Clear the velocity components that would push `hitbox` into a wall
///
/// `position` is the top-left anchor of the sprite; the hitbox is centered
/// on the sprite's center, so `sprite_size` gives the offset between the
/// two. The returned velocity equals `velocity` with zero, one or both
/// components set to zero.
pub fn resolve(
    position: Vec2,
    velocity: Vec2,
    hitbox: &Aabb,
    sprite_size: Vec2,
    grid: &OccupancyGrid,
) -> Result<Vec2, InputError> {
    ensure_finite(position.x, "position x")?;
    ensure_finite(position.y, "position y")?;
    ensure_finite(velocity.x, "velocity x")?;
    ensure_finite(velocity.y, "velocity y")?;
    ensure_finite(sprite_size.x, "sprite width")?;
    ensure_finite(sprite_size.y, "sprite height")?;
    let sized = |side: f32| side.is_finite() && side > 0.0;
    if !(sized(hitbox.width) && sized(hitbox.height)) {
        return Err(InputError::InvalidHitbox {
            width: hitbox.width,
            height: hitbox.height,
        });
    }

    let cell_size = grid.cell_size();
    if velocity.x.abs() > cell_size || velocity.y.abs() > cell_size {
        return Err(InputError::TooFast {
            vx: velocity.x,
            vy: velocity.y,
            cell_size,
        });
    }

    let center = position + sprite_size * 0.5;
    let (cx, cy) = grid.cell_of(center + velocity);

    // Everything past the grid is wall, including the cell the body is headed into
    if !grid.in_bounds(cx, cy) {
        return Ok(Vec2::ZERO);
    }

    let mut tiles = blocking_neighbours(grid, cx, cy).peekable();
    if tiles.peek().is_none() {
        return Ok(velocity);
    }

    let body = hitbox.centered_at(center);
    let horizontal = body.translated(velocity.x, 0.0);
    let vertical = body.translated(0.0, velocity.y);

    let mut resolved = velocity;
    for tile in tiles {
        if horizontal.overlaps(&tile) {
            resolved.x = 0.0;
        }
        if vertical.overlaps(&tile) {
            resolved.y = 0.0;
        }
    }
    Ok(resolved)
}

/// World rectangles of the blocking cells around `(cx, cy)`
///
/// The center cell itself is never included. Neighbours outside the grid
/// count as blocking; cell indices saturate at the `i32` range.
pub fn blocking_neighbours(
    grid: &OccupancyGrid,
    cx: i32,
    cy: i32,
) -> impl Iterator<Item = Aabb> + '_ {
    let cell_size = grid.cell_size();
    NEIGHBOURS
        .iter()
        .map(move |(dx, dy)| (cx.saturating_add(*dx), cy.saturating_add(*dy)))
        .filter(move |&(x, y)| grid.collides(x, y))
        .map(move |(x, y)| Aabb::cell(x, y, cell_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPRITE: Vec2 = Vec2 { x: 16.0, y: 16.0 };

    /// 5x5 open grid with the listed cells walled
    fn grid_with(walls: &[(usize, usize)]) -> OccupancyGrid {
        let mut rows = vec![vec![false; 5]; 5];
        for &(cx, cy) in walls {
            rows[cy][cx] = true;
        }
        OccupancyGrid::from_rows(&rows, 16.0).unwrap()
    }

    /// Top-left sprite anchor for a body centered on `center`
    fn anchor(center: Vec2) -> Vec2 {
        center - SPRITE * 0.5
    }

    fn resolve_at(center: Vec2, velocity: Vec2, hitbox: &Aabb, grid: &OccupancyGrid) -> Vec2 {
        resolve(anchor(center), velocity, hitbox, SPRITE, grid).unwrap()
    }

    #[test]
    fn test_open_neighbourhood_is_noop() {
        let grid = grid_with(&[]);
        let velocity = Vec2::new(1.5, -0.7);
        let hitbox = Aabb::from_size(10.0, 10.0);

        let resolved = resolve_at(Vec2::new(40.0, 40.0), velocity, &hitbox, &grid);
        assert_eq!(resolved, velocity);
    }

    #[test]
    fn test_slides_along_east_wall() {
        let grid = grid_with(&[(3, 2)]);
        let hitbox = Aabb::from_size(10.0, 10.0);

        // Right edge of the body at x = 47, wall starts at x = 48
        let resolved = resolve_at(Vec2::new(42.0, 40.0), Vec2::new(2.0, 1.0), &hitbox, &grid);
        assert_eq!(resolved, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_moving_away_from_wall_is_kept() {
        let grid = grid_with(&[(3, 2)]);
        let hitbox = Aabb::from_size(10.0, 10.0);
        let velocity = Vec2::new(-2.0, 1.0);

        let resolved = resolve_at(Vec2::new(42.0, 40.0), velocity, &hitbox, &grid);
        assert_eq!(resolved, velocity);
    }

    #[test]
    fn test_inside_corner_blocks_both_axes() {
        let grid = grid_with(&[(3, 2), (2, 3)]);
        let hitbox = Aabb::from_size(10.0, 10.0);

        let resolved = resolve_at(Vec2::new(42.0, 42.0), Vec2::new(2.0, 2.0), &hitbox, &grid);
        assert_eq!(resolved, Vec2::ZERO);
    }

    #[test]
    fn test_touching_wall_is_not_a_collision() {
        let grid = grid_with(&[(3, 2)]);
        let hitbox = Aabb::from_size(16.0, 16.0);

        // Body spans x 32..48, flush against the wall; moving along it
        let velocity = Vec2::new(0.0, 1.0);
        let resolved = resolve_at(Vec2::new(40.0, 40.0), velocity, &hitbox, &grid);
        assert_eq!(resolved, velocity);
    }

    #[test]
    fn test_surrounded_blocks_everything() {
        let grid = OccupancyGrid::from_bits(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]], 16.0).unwrap();
        let hitbox = Aabb::from_size(16.0, 16.0);

        for velocity in [
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(0.5, -2.0),
            Vec2::new(-3.0, -3.0),
        ] {
            let resolved = resolve_at(Vec2::new(24.0, 24.0), velocity, &hitbox, &grid);
            assert_eq!(resolved, Vec2::ZERO, "velocity {:?}", velocity);
        }
    }

    #[test]
    fn test_grid_edge_blocks() {
        // Single open cell: every neighbour is outside the grid
        let grid = OccupancyGrid::from_bits(&[[0u8]], 16.0).unwrap();
        let hitbox = Aabb::from_size(16.0, 16.0);

        let resolved = resolve(Vec2::ZERO, Vec2::new(0.5, -0.5), &hitbox, SPRITE, &grid).unwrap();
        assert_eq!(resolved, Vec2::ZERO);
    }

    #[test]
    fn test_deterministic() {
        let grid = grid_with(&[(3, 2), (1, 1)]);
        let hitbox = Aabb::from_size(10.0, 10.0);
        let args = (anchor(Vec2::new(42.0, 35.0)), Vec2::new(2.0, -1.5));

        let a = resolve(args.0, args.1, &hitbox, SPRITE, &grid).unwrap();
        let b = resolve(args.0, args.1, &hitbox, SPRITE, &grid).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blocking_neighbours() {
        let grid = grid_with(&[(3, 2), (2, 2)]);

        // Center cell (2, 2) is skipped even though it is a wall
        let tiles: Vec<Aabb> = blocking_neighbours(&grid, 2, 2).collect();
        assert_eq!(tiles, vec![Aabb::cell(3, 2, 16.0)]);

        // Corner cell: five neighbours lie outside the grid
        assert_eq!(blocking_neighbours(&grid, 0, 0).count(), 5);
    }

    #[test]
    fn test_body_far_outside_the_map_is_stuck() {
        let grid = OccupancyGrid::from_bits(&[[0u8, 0], [0, 0]], 16.0).unwrap();
        let hitbox = Aabb::from_size(10.0, 10.0);

        for position in [
            Vec2::new(1.0e12, 0.0),
            Vec2::new(-1.0e12, -1.0e12),
            Vec2::new(40.0, 8.0),
        ] {
            let resolved = resolve(position, Vec2::new(1.0, 0.0), &hitbox, SPRITE, &grid);
            assert_eq!(resolved, Ok(Vec2::ZERO), "position {:?}", position);
        }
    }

    #[test]
    fn test_neighbours_at_index_limits() {
        let grid = grid_with(&[]);
        assert_eq!(blocking_neighbours(&grid, i32::MAX, i32::MAX).count(), 8);
        assert_eq!(blocking_neighbours(&grid, i32::MIN, 0).count(), 8);
    }

    #[test]
    fn test_rejects_bad_input() {
        let grid = grid_with(&[]);
        let hitbox = Aabb::from_size(10.0, 10.0);
        let pos = Vec2::new(32.0, 32.0);

        assert_eq!(
            resolve(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, &hitbox, SPRITE, &grid),
            Err(InputError::NonFinite { what: "position x" })
        );
        assert_eq!(
            resolve(pos, Vec2::new(0.0, f32::INFINITY), &hitbox, SPRITE, &grid),
            Err(InputError::NonFinite { what: "velocity y" })
        );
        assert_eq!(
            resolve(pos, Vec2::ZERO, &Aabb::from_size(0.0, 10.0), SPRITE, &grid),
            Err(InputError::InvalidHitbox { width: 0.0, height: 10.0 })
        );
        assert!(matches!(
            resolve(pos, Vec2::new(17.0, 0.0), &hitbox, SPRITE, &grid),
            Err(InputError::TooFast { .. })
        ));
    }
}
