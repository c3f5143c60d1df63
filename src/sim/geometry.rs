//! Geometric primitives handed over by the table loader
//!
//! Rectangles are the broad-phase bounds; circles, rays and line segments are
//! the narrow-phase shapes. Derived fields (segment direction, perpendicular,
//! extent) are computed once at construction.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::math::{distance, normalize_2d};
use crate::consts::NO_HIT;

/// Integer axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

/// Smallest rectangle covering both inputs
pub fn enclosing_box(a: &Rect, b: &Rect) -> Rect {
    let (mut x, mut width) = (a.x, a.width);
    if b.x < a.x {
        x = b.x;
        width += a.x - b.x;
    }

    let (mut y, mut height) = (a.y, a.height);
    if b.y < a.y {
        y = b.y;
        height += a.y - b.y;
    }

    if b.right() > x + width {
        width = b.right() - x;
    }
    if b.bottom() > y + height {
        height = b.bottom() - y;
    }

    Rect::new(x, y, width, height)
}

/// Intersection of two rectangles, `None` when disjoint or zero-area
pub fn rectangle_clip(a: &Rect, b: &Rect) -> Option<Rect> {
    let b_right = b.right();
    if b.x >= a.right() || a.x >= b_right {
        return None;
    }

    let b_bottom = b.bottom();
    if b.y >= a.bottom() || a.y >= b_bottom {
        return None;
    }

    let (mut x, mut width) = (a.x, a.width);
    if a.x < b.x {
        x = b.x;
        width += a.x - b.x;
    }

    let (mut y, mut height) = (a.y, a.height);
    if a.y < b.y {
        y = b.y;
        height += a.y - b.y;
    }

    if x + width > b_right {
        width = b_right - x;
    }
    if y + height > b_bottom {
        height = b_bottom - y;
    }

    if width == 0 || height == 0 {
        return None;
    }
    Some(Rect::new(x, y, width, height))
}

/// Circle stored by squared radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius_sq: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius_sq: radius * radius,
        }
    }
}

/// Bounded directed ray cast used for one tick of continuous collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec2,
    /// Unit length by convention
    pub direction: Vec2,
    pub max_distance: f32,
    /// Tolerance behind the origin still accepted by segment tests
    pub min_distance: f32,
    pub time_now: f32,
    pub time_delta: f32,
    pub field_flag: i32,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f32) -> Self {
        Self {
            origin,
            direction,
            max_distance,
            min_distance: 0.0,
            time_now: 0.0,
            time_delta: 0.0,
            field_flag: 0,
        }
    }

    /// Point at `distance` along the ray
    #[inline]
    pub fn point_at(&self, distance: f32) -> Vec2 {
        Vec2::new(
            distance * self.direction.x + self.origin.x,
            distance * self.direction.y + self.origin.y,
        )
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::X, NO_HIT)
    }
}

/// One-sided line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub origin: Vec2,
    pub direction: Vec2,
    /// Clockwise perpendicular of `direction`, the collidable face normal
    pub perpendicular: Vec2,
    pub min_coord: f32,
    pub max_coord: f32,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        let mut direction = Vec2::new(end.x - start.x, end.y - start.y);
        normalize_2d(&mut direction);

        let perpendicular = Vec2::new(direction.y, -direction.x);

        let (mut line_start, mut line_end) = (start.x, end.x);
        if direction.x.abs() < 0.000_000_001 {
            direction.x = 0.0;
            line_start = start.y;
            line_end = end.y;
        }

        Self {
            origin: start,
            direction,
            perpendicular,
            min_coord: line_start.min(line_end),
            max_coord: line_start.max(line_end),
        }
    }

    /// Coordinate along the bounding axis used for the extent check
    #[inline]
    pub fn extent_coord(&self, point: Vec2) -> f32 {
        if self.direction.x != 0.0 { point.x } else { point.y }
    }
}

/// Wall endpoints as stored in the table data
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallPoint {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Ramp facet; only its three edges take part in matching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPlane {
    pub ball_collision_offset: Vec3,
    pub v1: Vec2,
    pub v2: Vec2,
    pub v3: Vec2,
    pub gravity_angle1: f32,
    pub gravity_angle2: f32,
    pub field_force: Vec2,
}

/// Find the ramp edge whose endpoints best match a wall.
///
/// Returns `(line_end, line_start)`; `None` when there are no planes.
pub fn find_closest_edge(planes: &[RampPlane], wall: &WallPoint) -> Option<(Vec2, Vec2)> {
    let wall_start = Vec2::new(wall.x0, wall.y0);
    let wall_end = Vec2::new(wall.x1, wall.y1);

    let mut best = None;
    let mut max_distance = NO_HIT;
    for plane in planes {
        let order = [plane.v1, plane.v2, plane.v3, plane.v1];
        for pair in order.windows(2) {
            let d = distance(wall_start, pair[0]) + distance(wall_end, pair[1]);
            if d < max_distance {
                max_distance = d;
                best = Some((pair[0], pair[1]));
            }
        }
    }
    best
}
