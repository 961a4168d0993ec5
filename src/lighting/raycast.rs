//! Grid raycasting
//!
//! Rays are traced cell by cell with a DDA walk: the ray always advances
//! to whichever grid line (vertical or horizontal) it reaches first, so
//! every cell it passes through is visited exactly once. Tracing stops at
//! the first blocking cell or at the maximum distance, whichever comes
//! first. Cells outside the grid block.

use crate::error::{ensure_finite, InputError};
use crate::geometry::Vec2;
use crate::world::OccupancyGrid;

/// Fraction of a step tolerated when deciding whether the last ray of a
/// sweep lands on the stop angle
const ANGLE_EPSILON: f32 = 1e-4;

/// Most rays a single sweep may cast
pub const MAX_RAYS: usize = 1 << 16;

/// Which grid line a ray crossed last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Vertical,
    Horizontal,
}

/// Trace a single ray and return where it stops
///
/// The result is the exact point where the ray crosses into the first
/// blocking cell, or the point `max_distance` along the ray when nothing
/// blocks it sooner. A ray whose origin lies outside the grid does not
/// travel at all and returns `origin`.
pub fn cast_ray(
    origin: Vec2,
    angle: f32,
    max_distance: f32,
    grid: &OccupancyGrid,
) -> Result<Vec2, InputError> {
    ensure_finite(origin.x, "ray origin x")?;
    ensure_finite(origin.y, "ray origin y")?;
    ensure_finite(angle, "ray angle")?;
    check_distance(max_distance)?;

    Ok(trace(origin, Vec2::from_angle(angle), max_distance, grid))
}

fn check_distance(max_distance: f32) -> Result<(), InputError> {
    ensure_finite(max_distance, "max ray distance")?;
    if max_distance < 0.0 {
        return Err(InputError::NegativeDistance(max_distance));
    }
    Ok(())
}

/// DDA walk along a unit direction. Inputs are already validated.
fn trace(origin: Vec2, dir: Vec2, max_distance: f32, grid: &OccupancyGrid) -> Vec2 {
    let cell_size = grid.cell_size();
    let (mut cx, mut cy) = grid.cell_of(origin);
    if !grid.in_bounds(cx, cy) {
        return origin;
    }

    let (step_x, delta_x, mut side_x) = axis_setup(origin.x, dir.x, cx, cell_size);
    let (step_y, delta_y, mut side_y) = axis_setup(origin.y, dir.y, cy, cell_size);

    loop {
        let (travelled, side) = if side_x < side_y {
            (side_x, Side::Vertical)
        } else {
            (side_y, Side::Horizontal)
        };

        if travelled > max_distance {
            return origin + dir * max_distance;
        }

        match side {
            Side::Vertical => {
                cx += step_x;
                side_x += delta_x;
            }
            Side::Horizontal => {
                cy += step_y;
                side_y += delta_y;
            }
        }

        if grid.collides(cx, cy) {
            return match side {
                Side::Vertical => Vec2::new(
                    entry_line(cx, step_x, cell_size),
                    origin.y + dir.y * travelled,
                ),
                Side::Horizontal => Vec2::new(
                    origin.x + dir.x * travelled,
                    entry_line(cy, step_y, cell_size),
                ),
            };
        }
    }
}

/// Per-axis DDA state: cell step, distance between grid lines along the
/// ray, and distance to the first grid line
fn axis_setup(origin: f32, dir: f32, cell: i32, cell_size: f32) -> (i32, f32, f32) {
    if dir > 0.0 {
        let next_line = (cell + 1) as f32 * cell_size;
        (1, cell_size / dir, (next_line - origin) / dir)
    } else if dir < 0.0 {
        let next_line = cell as f32 * cell_size;
        (-1, cell_size / -dir, (origin - next_line) / -dir)
    } else {
        // Parallel to this axis: never crosses its grid lines
        (0, f32::INFINITY, f32::INFINITY)
    }
}

/// World coordinate of the grid line crossed when entering `cell`
#[inline]
fn entry_line(cell: i32, step: i32, cell_size: f32) -> f32 {
    if step > 0 {
        cell as f32 * cell_size
    } else {
        (cell + 1) as f32 * cell_size
    }
}

/// An angular sweep of rays around one origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySweep {
    pub origin: Vec2,
    pub start_angle: f32,
    pub stop_angle: f32,
    /// Angle between adjacent rays. At range `max_distance` adjacent rays
    /// are `step * max_distance` apart; past one cell width a one-cell gap
    /// may fall between them. Smaller steps cost more rays per frame.
    pub step: f32,
    pub max_distance: f32,
}

impl RaySweep {
    pub fn validate(&self) -> Result<(), InputError> {
        ensure_finite(self.origin.x, "ray origin x")?;
        ensure_finite(self.origin.y, "ray origin y")?;
        ensure_finite(self.start_angle, "sweep start angle")?;
        ensure_finite(self.stop_angle, "sweep stop angle")?;
        check_distance(self.max_distance)?;

        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(InputError::InvalidStep(self.step));
        }
        if self.stop_angle < self.start_angle {
            return Err(InputError::ReversedSweep {
                start: self.start_angle,
                stop: self.stop_angle,
            });
        }
        if self.steps() >= MAX_RAYS as f32 {
            return Err(InputError::TooManyRays {
                step: self.step,
                limit: MAX_RAYS,
            });
        }
        Ok(())
    }

    /// Whole steps between the start and stop angles, unbounded
    fn steps(&self) -> f32 {
        ((self.stop_angle - self.start_angle) / self.step + ANGLE_EPSILON).floor()
    }

    /// Number of rays in the sweep, between one and [`MAX_RAYS`]
    pub fn ray_count(&self) -> usize {
        let steps = self.steps();
        if steps >= MAX_RAYS as f32 {
            MAX_RAYS
        } else {
            // NaN and negative spans cast as zero
            steps as usize + 1
        }
    }

    /// Angle of ray `index`, never past the stop angle
    #[inline]
    pub fn angle_at(&self, index: usize) -> f32 {
        (self.start_angle + index as f32 * self.step).min(self.stop_angle)
    }

    /// Distance between the tips of adjacent rays at full range
    pub fn tip_spacing(&self) -> f32 {
        self.step * self.max_distance
    }
}

/// Lazily evaluated fan of ray hits in ascending angle order
///
/// Each call to [`RayFan::iter`] starts the sweep again from the first
/// angle; nothing is cached between passes.
#[derive(Debug, Clone, Copy)]
pub struct RayFan<'a> {
    sweep: RaySweep,
    count: usize,
    grid: &'a OccupancyGrid,
}

impl<'a> RayFan<'a> {
    pub fn new(sweep: RaySweep, grid: &'a OccupancyGrid) -> Result<Self, InputError> {
        sweep.validate()?;
        Ok(Self {
            count: sweep.ray_count(),
            sweep,
            grid,
        })
    }

    pub fn sweep(&self) -> &RaySweep {
        &self.sweep
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> Rays<'a> {
        Rays {
            sweep: self.sweep,
            grid: self.grid,
            next: 0,
            count: self.count,
        }
    }
}

impl<'a> IntoIterator for &RayFan<'a> {
    type Item = Vec2;
    type IntoIter = Rays<'a>;

    fn into_iter(self) -> Rays<'a> {
        self.iter()
    }
}

/// One pass over a [`RayFan`]
#[derive(Debug, Clone)]
pub struct Rays<'a> {
    sweep: RaySweep,
    grid: &'a OccupancyGrid,
    next: usize,
    count: usize,
}

impl Iterator for Rays<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.next >= self.count {
            return None;
        }
        let angle = self.sweep.angle_at(self.next);
        self.next += 1;
        Some(trace(
            self.sweep.origin,
            Vec2::from_angle(angle),
            self.sweep.max_distance,
            self.grid,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rays<'_> {}

/// Fan of rays from `start_angle` to `stop_angle` (inclusive) every `step`
///
/// Prefixed with `origin`, the hits form the vertex list of a visibility
/// polygon fanned out from the origin.
pub fn cast_ray_fan(
    origin: Vec2,
    start_angle: f32,
    stop_angle: f32,
    step: f32,
    max_distance: f32,
    grid: &OccupancyGrid,
) -> Result<RayFan<'_>, InputError> {
    RayFan::new(
        RaySweep {
            origin,
            start_angle,
            stop_angle,
            step,
            max_distance,
        },
        grid,
    )
}
