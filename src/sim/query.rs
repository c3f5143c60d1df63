//! Ray queries against table geometry
//!
//! Every query is total: a miss is reported as [`NO_HIT`] rather than an
//! error, and callers branch on `distance < NO_HIT`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, LineSegment, Ray};
use super::math::{cross_2d, dot, normalize_2d, sub};
use crate::consts::NO_HIT;

/// Distance along a ray plus the point it lands on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec2,
}

impl RayHit {
    pub const MISS: Self = Self {
        distance: NO_HIT,
        point: Vec2::ZERO,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.distance < NO_HIT
    }
}

/// Distance from the ray origin to the first crossing of the circle.
///
/// A ray starting inside the circle returns the (negative) near root.
pub fn ray_intersect_circle(ray: &Ray, circle: &Circle) -> f32 {
    let l = sub(circle.center, ray.origin);

    // Projection of L on the ray, circle is behind the origin when negative
    let tca = dot(l, ray.direction);
    if tca < 0.0 {
        return NO_HIT;
    }

    let l_mag_sq = dot(l, l);
    let thc_sq = circle.radius_sq - l_mag_sq + tca * tca;

    if l_mag_sq < circle.radius_sq {
        return tca - thc_sq.sqrt();
    }

    if thc_sq < 0.0 {
        return NO_HIT;
    }

    let t0 = tca - thc_sq.sqrt();
    if t0 < 0.0 || t0 > ray.max_distance {
        return NO_HIT;
    }
    t0
}

/// Distance from the ray origin to a one-sided segment.
///
/// Only rays approaching the face the clockwise perpendicular points out of
/// can hit.
pub fn ray_intersect_line(ray: &Ray, line: &LineSegment) -> RayHit {
    let v1 = sub(ray.origin, line.origin);
    let v2 = line.direction;
    let v3 = Vec2::new(-ray.direction.y, ray.direction.x);

    let v2_dot_v3 = dot(v2, v3);
    if v2_dot_v3 < 0.0 {
        let distance = cross_2d(v2, v1) / v2_dot_v3;
        if distance >= -ray.min_distance && distance <= ray.max_distance {
            let point = ray.point_at(distance);
            let test = line.extent_coord(point);
            if test >= line.min_coord && test <= line.max_coord {
                return RayHit { distance, point };
            }
        }
    }

    RayHit::MISS
}

/// The four primitives that make up a flipper's collision outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipperEdges {
    pub line_a: LineSegment,
    pub line_b: LineSegment,
    pub circle_base: Circle,
    pub circle_t1: Circle,
}

/// Which flipper primitive produced the nearest hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipperPart {
    LineA,
    LineB,
    CircleBase,
    CircleT1,
}

fn circle_hit(ray: &Ray, circle: &Circle) -> RayHit {
    let distance = ray_intersect_circle(ray, circle);
    if distance < NO_HIT {
        RayHit {
            distance,
            point: ray.point_at(distance),
        }
    } else {
        RayHit::MISS
    }
}

/// Nearest part of a flipper outline hit by `ray`.
///
/// Checked in the order line A, base circle, tip circle, line B; a later part
/// only wins on a strictly shorter distance, so ties go to the earlier part.
pub fn nearest_flipper_part(edges: &FlipperEdges, ray: &Ray) -> Option<(FlipperPart, RayHit)> {
    let candidates = [
        (FlipperPart::LineA, ray_intersect_line(ray, &edges.line_a)),
        (FlipperPart::CircleBase, circle_hit(ray, &edges.circle_base)),
        (FlipperPart::CircleT1, circle_hit(ray, &edges.circle_t1)),
        (FlipperPart::LineB, ray_intersect_line(ray, &edges.line_b)),
    ];

    let mut nearest = None;
    let mut distance = NO_HIT;
    for (part, hit) in candidates {
        if hit.distance < distance {
            distance = hit.distance;
            nearest = Some((part, hit));
        }
    }
    nearest
}

/// Distance from `ray` to a flipper outline.
///
/// When `reflection` is given and something was hit it is rewritten into a
/// ray leaving the contact point along the surface normal. On a miss it is
/// left untouched.
pub fn distance_to_flipper(edges: &FlipperEdges, ray: &Ray, reflection: Option<&mut Ray>) -> f32 {
    let Some((part, hit)) = nearest_flipper_part(edges, ray) else {
        return NO_HIT;
    };

    if let Some(normal_ray) = reflection {
        normal_ray.origin = hit.point;
        normal_ray.direction = match part {
            FlipperPart::LineA => edges.line_a.perpendicular,
            FlipperPart::LineB => edges.line_b.perpendicular,
            FlipperPart::CircleBase | FlipperPart::CircleT1 => {
                let center = if part == FlipperPart::CircleBase {
                    edges.circle_base.center
                } else {
                    edges.circle_t1.center
                };
                let mut radial = sub(hit.point, center);
                normalize_2d(&mut radial);
                radial
            }
        };
    }
    hit.distance
}
