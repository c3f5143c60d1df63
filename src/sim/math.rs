//! Vector and scalar helpers
//!
//! Thin single-precision wrappers over glam that keep the exact arithmetic
//! order of the table physics. No epsilon is applied anywhere in here.

use glam::{Vec2, Vec3};

#[inline]
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x + b.x, a.y + b.y)
}

#[inline]
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f32 {
    a.x * b.x + a.y * b.y
}

/// Z component of the 3D cross product of two planar vectors
#[inline]
pub fn cross_2d(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn cross_3d(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(
        b.z * a.y - b.y * a.z,
        b.x * a.z - a.x * b.z,
        a.x * b.y - b.x * a.y,
    )
}

/// Length of a 3D vector, 0 for the zero vector
pub fn magnitude(v: Vec3) -> f32 {
    let mag_sq = v.x * v.x + v.y * v.y + v.z * v.z;
    if mag_sq == 0.0 { 0.0 } else { mag_sq.sqrt() }
}

/// Normalize in place and return the previous length.
///
/// A zero vector is left untouched and 0 is returned.
pub fn normalize_2d(v: &mut Vec2) -> f32 {
    let mag = (v.x * v.x + v.y * v.y).sqrt();
    if mag != 0.0 {
        v.x /= mag;
        v.y /= mag;
    }
    mag
}

/// [`normalize_2d`] applied to the planar part of a 3D vector (z untouched)
pub fn normalize_xy(v: &mut Vec3) -> f32 {
    let mut xy = v.truncate();
    let mag = normalize_2d(&mut xy);
    v.x = xy.x;
    v.y = xy.y;
    mag
}

#[inline]
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dy * dy + dx * dx
}

#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    distance_squared(a, b).sqrt()
}

#[inline]
pub fn sin_cos(angle: f32) -> (f32, f32) {
    (angle.sin(), angle.cos())
}

/// Rotate `point` around `origin` by a precomputed sin/cos pair
pub fn rotate_pt(point: &mut Vec2, sin: f32, cos: f32, origin: Vec2) {
    let dir_x = point.x - origin.x;
    let dir_y = point.y - origin.y;
    point.x = dir_x * cos - dir_y * sin + origin.x;
    point.y = dir_x * sin + dir_y * cos + origin.y;
}

/// Rotate the planar part of `v` by `angle`.
///
/// Y is computed from the already rotated X, so any nonzero angle traces a
/// figure eight instead of a circle. Ball throws depend on this exact
/// trajectory; an angle of 0 is an exact identity.
pub fn rotate_vector(v: &mut Vec3, angle: f32) {
    let (s, c) = sin_cos(angle);
    v.x = c * v.x - s * v.y;
    v.y = s * v.x + c * v.y;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_normalize_zero_is_noop() {
        let mut v = Vec2::ZERO;
        assert_eq!(normalize_2d(&mut v), 0.0);
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn test_normalize_returns_magnitude() {
        let mut v = Vec2::new(3.0, 4.0);
        assert_eq!(normalize_2d(&mut v), 5.0);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_xy_keeps_z() {
        let mut v = Vec3::new(0.0, 2.0, 7.0);
        assert_eq!(normalize_xy(&mut v), 2.0);
        assert_eq!(v, Vec3::new(0.0, 1.0, 7.0));
    }

    #[test]
    fn test_magnitude_zero_safe() {
        assert_eq!(magnitude(Vec3::ZERO), 0.0);
        assert_eq!(magnitude(Vec3::new(2.0, 3.0, 6.0)), 7.0);
    }

    #[test]
    fn test_cross_products() {
        assert_eq!(cross_2d(Vec2::X, Vec2::Y), 1.0);
        assert_eq!(cross_2d(Vec2::Y, Vec2::X), -1.0);
        assert_eq!(cross_3d(Vec3::X, Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert_eq!(distance_squared(a, b), 25.0);
        assert_eq!(distance(a, b), 5.0);
    }

    #[test]
    fn test_rotate_pt_quarter_turn() {
        let mut p = Vec2::new(2.0, 1.0);
        let (s, c) = sin_cos(FRAC_PI_2);
        rotate_pt(&mut p, s, c, Vec2::new(1.0, 1.0));
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_vector_zero_angle_is_identity() {
        let mut v = Vec3::new(0.3, -0.7, 1.5);
        rotate_vector(&mut v, 0.0);
        assert_eq!(v, Vec3::new(0.3, -0.7, 1.5));
    }

    #[test]
    fn test_rotate_vector_uses_rotated_x() {
        // True rotation of (1, 1) by 90° is (-1, 1); this gives (-1, -1)
        let mut v = Vec3::new(1.0, 1.0, 0.0);
        rotate_vector(&mut v, FRAC_PI_2);
        let (s, c) = sin_cos(FRAC_PI_2);
        let x = c * 1.0 - s * 1.0;
        let y = s * x + c * 1.0;
        assert_eq!(v.x, x);
        assert_eq!(v.y, y);
        assert!((v.y + 1.0).abs() < 1e-6);
    }
}
