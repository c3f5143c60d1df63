//! Ball kinematic state as seen by the collision core
//!
//! The driver owns the balls; contact handlers only get `&mut Ball`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::math::rotate_vector;

/// Identifier of a table edge, used to suppress repeat contacts in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

/// Edges remembered per tick before the oldest half is dropped
pub const MAX_EDGE_MARKS: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub position: Vec2,
    /// Unit direction in xy; z carries the vertical component for ramps
    pub acceleration: Vec3,
    pub speed: f32,
    /// Ray length still available to this ball in the current tick
    pub ray_max_distance: f32,
    /// Cleared while the ball is held by a table element
    pub active: bool,
    #[serde(skip)]
    edge_marks: Vec<EdgeId>,
}

impl Ball {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            acceleration: Vec3::ZERO,
            speed: 0.0,
            ray_max_distance: 0.0,
            active: true,
            edge_marks: Vec::with_capacity(MAX_EDGE_MARKS),
        }
    }

    /// Planar velocity (direction scaled by speed)
    pub fn velocity(&self) -> Vec2 {
        self.acceleration.truncate() * self.speed
    }

    /// Don't test `edge` against this ball again until the marks are cleared.
    ///
    /// When the list is full the newest half is kept and `edge` appended.
    pub fn not_again(&mut self, edge: EdgeId) {
        if self.edge_marks.len() >= MAX_EDGE_MARKS {
            self.edge_marks.drain(..MAX_EDGE_MARKS / 2);
        }
        self.edge_marks.push(edge);
    }

    pub fn already_hit(&self, edge: EdgeId) -> bool {
        self.edge_marks.contains(&edge)
    }

    /// Forget all edge marks (start of a new tick)
    pub fn clear_edge_marks(&mut self) {
        self.edge_marks.clear();
    }

    /// Stop the ball dead
    pub fn halt(&mut self) {
        self.acceleration = Vec3::ZERO;
        self.speed = 0.0;
        self.ray_max_distance = 0.0;
    }

    /// Launch the ball along `acceleration` with randomized spread.
    ///
    /// `random` yields values in [0, 1). The angle is perturbed by up to
    /// ±`angle_mult` and the speed is `speed_mult1` ± `speed_mult1 * speed_mult2`.
    pub fn throw_ball(
        &mut self,
        acceleration: Vec3,
        angle_mult: f32,
        speed_mult1: f32,
        speed_mult2: f32,
        mut random: impl FnMut() -> f32,
    ) {
        self.acceleration = acceleration;
        let rnd = random();
        let angle = (1.0 - (rnd + rnd)) * angle_mult;
        rotate_vector(&mut self.acceleration, angle);
        let rnd = random();
        self.speed = (1.0 - (rnd + rnd)) * (speed_mult1 * speed_mult2) + speed_mult1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_again_marks_edge() {
        let mut ball = Ball::new(1);
        assert!(!ball.already_hit(EdgeId(4)));
        ball.not_again(EdgeId(4));
        assert!(ball.already_hit(EdgeId(4)));
        ball.clear_edge_marks();
        assert!(!ball.already_hit(EdgeId(4)));
    }

    #[test]
    fn test_not_again_overflow_keeps_newest_half() {
        let mut ball = Ball::new(1);
        for i in 0..MAX_EDGE_MARKS as u32 {
            ball.not_again(EdgeId(i));
        }
        ball.not_again(EdgeId(100));
        assert!(!ball.already_hit(EdgeId(0)));
        assert!(!ball.already_hit(EdgeId(7)));
        assert!(ball.already_hit(EdgeId(8)));
        assert!(ball.already_hit(EdgeId(15)));
        assert!(ball.already_hit(EdgeId(100)));
    }

    #[test]
    fn test_throw_ball_without_spread() {
        let mut ball = Ball::new(1);
        let dir = Vec3::new(0.6, -0.8, 0.0);
        ball.throw_ball(dir, 0.0, 12.0, 0.0, || 0.25);
        assert_eq!(ball.acceleration, dir);
        assert_eq!(ball.speed, 12.0);
    }

    #[test]
    fn test_throw_ball_speed_spread() {
        let mut ball = Ball::new(1);
        // r = 0 gives the upper bound of the speed range
        ball.throw_ball(Vec3::Y, 0.0, 10.0, 0.5, || 0.0);
        assert_eq!(ball.speed, 15.0);
        ball.throw_ball(Vec3::Y, 0.0, 10.0, 0.5, || 0.5);
        assert_eq!(ball.speed, 10.0);
    }

    #[test]
    fn test_halt_zeroes_motion() {
        let mut ball = Ball::new(1);
        ball.acceleration = Vec3::X;
        ball.speed = 3.0;
        ball.ray_max_distance = 2.0;
        ball.halt();
        assert_eq!(ball.velocity(), Vec2::ZERO);
        assert_eq!(ball.ray_max_distance, 0.0);
    }
}
