//! Collision response
//!
//! Turns a contact normal into a new ball direction and speed using the
//! table element's elasticity, smoothness, threshold and boost.

use glam::Vec2;

use super::ball::Ball;
use super::math::normalize_xy;

/// Bounce `ball` off a surface with normal `direction`.
///
/// The ball is first moved to `next_position`. Returns the impact speed
/// (projected speed before any boost) so callers can pick hard/soft sounds.
pub fn basic_collision(
    ball: &mut Ball,
    next_position: Vec2,
    direction: Vec2,
    elasticity: f32,
    smoothness: f32,
    threshold: f32,
    boost: f32,
) -> f32 {
    ball.position = next_position;

    let mut proj = -(direction.y * ball.acceleration.y + direction.x * ball.acceleration.x);
    if proj < 0.0 {
        // Already separating
        proj = -proj;
    } else {
        let dx1 = proj * direction.x;
        let dy1 = proj * direction.y;
        ball.acceleration.x = (dx1 + ball.acceleration.x) * smoothness + dx1 * elasticity;
        ball.acceleration.y = (dy1 + ball.acceleration.y) * smoothness + dy1 * elasticity;
        normalize_xy(&mut ball.acceleration);
    }

    let proj_speed = proj * ball.speed;
    let new_speed = ball.speed - (1.0 - elasticity) * proj_speed;
    ball.speed = new_speed;

    if proj_speed >= threshold {
        ball.acceleration.x = new_speed * ball.acceleration.x + direction.x * boost;
        ball.acceleration.y = new_speed * ball.acceleration.y + direction.y * boost;
        ball.speed = normalize_xy(&mut ball.acceleration);
    }
    proj_speed
}
