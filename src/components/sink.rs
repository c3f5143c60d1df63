//! Sink: swallows the ball, holds it, then throws it back into play
//!
//! The release point is either fixed by the table definition or taken from
//! where the ball was captured. The throw direction is perturbed by up to
//! ±`throw_angle_mult` and the speed by ±`throw_speed_mult1 * throw_speed_mult2`.

use glam::{Vec2, Vec3};

use super::{
    CollisionAttributes, CollisionComponent, ComponentId, Contact, play_optional, tilted_bounce,
};
use crate::consts::{MAX_PLAYERS, SINK_SCORE_SLOTS, events, messages};
use crate::settings::SinkDef;
use crate::sim::{Ball, SoundId, TableServices, TimerId};

#[derive(Debug, Clone)]
pub struct Sink {
    attributes: CollisionAttributes,
    /// Seconds the ball is held
    pub timer_time: f32,
    /// Where the ball reappears
    pub ball_position: Vec2,
    /// Direction the ball is thrown along
    pub ball_acceleration: Vec3,
    /// Release point comes from the table definition, not the capture
    fixed_release: bool,
    pub throw_angle_mult: f32,
    pub throw_speed_mult1: f32,
    pub throw_speed_mult2: f32,
    pub capture_sound: Option<SoundId>,
    pub eject_sound: Option<SoundId>,
    scores: [i32; SINK_SCORE_SLOTS],
    player_message_field_backup: [i32; MAX_PLAYERS],
    timer: Option<TimerId>,
    held_ball: Option<u32>,
}

impl Sink {
    pub fn new(attributes: CollisionAttributes, timer_time: f32) -> Self {
        Self {
            attributes,
            timer_time,
            ball_position: Vec2::ZERO,
            ball_acceleration: Vec3::ZERO,
            fixed_release: false,
            throw_angle_mult: 0.0,
            throw_speed_mult1: 0.0,
            throw_speed_mult2: 0.0,
            capture_sound: None,
            eject_sound: None,
            scores: [0; SINK_SCORE_SLOTS],
            player_message_field_backup: [0; MAX_PLAYERS],
            timer: None,
            held_ball: None,
        }
    }

    pub fn from_def(def: &SinkDef) -> Self {
        let mut sink = Self::new(def.attributes.clone(), def.timer_time)
            .with_throw(def.throw_angle_mult, def.throw_speed_mult1, def.throw_speed_mult2)
            .with_sounds(def.capture_sound, def.eject_sound);
        if let Some(release) = def.release {
            sink = sink.with_release(release.position, release.acceleration);
        }
        sink
    }

    /// Always release at `position`, thrown along `acceleration`
    pub fn with_release(mut self, position: Vec2, acceleration: Vec3) -> Self {
        self.ball_position = position;
        self.ball_acceleration = acceleration;
        self.fixed_release = true;
        self
    }

    pub fn with_throw(mut self, angle_mult: f32, speed_mult1: f32, speed_mult2: f32) -> Self {
        self.throw_angle_mult = angle_mult;
        self.throw_speed_mult1 = speed_mult1;
        self.throw_speed_mult2 = speed_mult2;
        self
    }

    pub fn with_sounds(mut self, capture: Option<SoundId>, eject: Option<SoundId>) -> Self {
        self.capture_sound = capture;
        self.eject_sound = eject;
        self
    }

    /// Id of the ball currently held
    pub fn held_ball(&self) -> Option<u32> {
        self.held_ball
    }

    fn schedule_eject(&mut self, id: ComponentId, table: &mut dyn TableServices, delay: f32) {
        if let Some(previous) = self.timer.take() {
            table.cancel(previous);
        }
        self.timer = Some(table.schedule(delay, id));
    }
}

impl CollisionComponent for Sink {
    fn attributes(&self) -> &CollisionAttributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut CollisionAttributes {
        &mut self.attributes
    }

    fn message(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        code: i32,
        value: f32,
    ) -> i32 {
        match code {
            messages::SINK_EJECT => {
                let delay = if value < 0.0 { self.timer_time } else { value };
                self.schedule_eject(id, table, delay);
            }
            messages::PLAYER_CHANGED => {
                let current = table.current_player();
                assert!(
                    value >= 0.0 && value < MAX_PLAYERS as f32,
                    "next player index out of range: {}",
                    value
                );
                assert!(
                    current < MAX_PLAYERS,
                    "current player index out of range: {}",
                    current
                );
                let next = value.floor() as usize;
                self.player_message_field_backup[current] = self.attributes.message_field;
                self.attributes.message_field = self.player_message_field_backup[next];
            }
            messages::RESET => {
                if let Some(timer) = self.timer.take() {
                    table.cancel(timer);
                }
                self.attributes.message_field = 0;
                self.player_message_field_backup = [0; MAX_PLAYERS];
                if let Some(ball) = self.held_ball.take() {
                    log::debug!("Sink {:?} reset while holding ball {}", id, ball);
                }
            }
            _ => {}
        }
        0
    }

    fn collision(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        ball: &mut Ball,
        contact: &Contact,
    ) {
        if table.tilt_locked() {
            tilted_bounce(&self.attributes, ball, contact);
            return;
        }

        assert!(
            self.held_ball.is_none(),
            "sink {:?} already holds ball {:?}, got ball {}",
            id,
            self.held_ball,
            ball.id
        );

        ball.position = contact.next_position;
        if !self.fixed_release {
            self.ball_position = contact.next_position;
            self.ball_acceleration = ball.acceleration;
        }
        ball.halt();
        ball.active = false;
        self.held_ball = Some(ball.id);

        play_optional(table, self.capture_sound);
        table.post_event(events::TRIGGER_HIT, id);
        self.schedule_eject(id, table, self.timer_time);
        log::debug!("Sink {:?} captured ball {}", id, ball.id);
    }

    fn timer_expired(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        _timer: TimerId,
        balls: &mut [Ball],
    ) {
        self.timer = None;
        let Some(ball_id) = self.held_ball.take() else {
            log::warn!("Sink {:?} eject with no ball held", id);
            return;
        };
        let Some(ball) = balls.iter_mut().find(|b| b.id == ball_id) else {
            log::warn!("Sink {:?} lost track of ball {}", id, ball_id);
            return;
        };

        ball.active = true;
        ball.position = self.ball_position;
        ball.throw_ball(
            self.ball_acceleration,
            self.throw_angle_mult,
            self.throw_speed_mult1,
            self.throw_speed_mult2,
            || table.random_float(),
        );
        play_optional(table, self.eject_sound);
        log::debug!(
            "Sink {:?} ejected ball {} at speed {}",
            id,
            ball.id,
            ball.speed
        );
    }

    fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    fn take_timer(&mut self) -> Option<TimerId> {
        self.timer.take()
    }

    fn get_scoring(&self, index: usize) -> i32 {
        assert!(index < SINK_SCORE_SLOTS, "sink score index {} out of range", index);
        self.scores[index]
    }

    fn put_scoring(&mut self, index: usize, score: i32) {
        assert!(index < SINK_SCORE_SLOTS, "sink score index {} out of range", index);
        self.scores[index] = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::sim::{EdgeId, Table, TableEvent};

    const CAPTURE: u32 = 30;
    const EJECT: u32 = 31;

    fn add_sink(table: &mut Table, sink: Sink) -> ComponentId {
        table.add_component(Component::Sink(sink.with_sounds(Some(CAPTURE), Some(EJECT))))
    }

    fn add_ball(table: &mut Table) -> u32 {
        let mut ball = Ball::new(0);
        ball.position = Vec2::new(5.0, 6.0);
        ball.acceleration = Vec3::new(0.6, -0.8, 0.0);
        ball.speed = 7.0;
        ball.ray_max_distance = 3.0;
        table.add_ball(ball)
    }

    fn contact() -> Contact {
        Contact {
            next_position: Vec2::new(5.0, 5.0),
            direction: Vec2::Y,
            coef: 1.0,
            edge: EdgeId(40),
        }
    }

    fn sink(table: &Table, id: ComponentId) -> &Sink {
        match table.components.get(id) {
            Some(Component::Sink(s)) => s,
            _ => panic!("not a sink"),
        }
    }

    #[test]
    fn test_capture_holds_ball() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        let ball = add_ball(&mut table);
        table.collide(id, ball, &contact());

        let b = table.ball(ball).unwrap();
        assert!(!b.active);
        assert_eq!(b.position, Vec2::new(5.0, 5.0));
        assert_eq!(b.speed, 0.0);
        assert_eq!(b.acceleration, Vec3::ZERO);
        assert_eq!(sink(&table, id).held_ball(), Some(ball));
        assert_eq!(sink(&table, id).ball_acceleration, Vec3::new(0.6, -0.8, 0.0));
        assert_eq!(table.context.sounds(), &[CAPTURE]);
        assert_eq!(
            table.context.events(),
            &[TableEvent {
                code: events::TRIGGER_HIT,
                source: id
            }]
        );
        assert_eq!(table.context.timers().len(), 1);
    }

    #[test]
    fn test_eject_after_timer_time() {
        let mut table = Table::new(0);
        let id = add_sink(
            &mut table,
            Sink::new(CollisionAttributes::default(), 1.0).with_throw(0.0, 12.0, 0.0),
        );
        table.put_scoring(id, 1, 2500);
        let ball = add_ball(&mut table);
        table.collide(id, ball, &contact());
        table.context.drain_sounds();

        assert_eq!(table.advance(0.5), 0);
        assert!(!table.ball(ball).unwrap().active);
        assert_eq!(table.advance(0.5), 1);

        let b = table.ball(ball).unwrap();
        assert!(b.active);
        assert_eq!(b.position, Vec2::new(5.0, 5.0));
        assert_eq!(b.acceleration, Vec3::new(0.6, -0.8, 0.0));
        assert_eq!(b.speed, 12.0);
        assert_eq!(table.context.sounds(), &[EJECT]);
        assert_eq!(table.get_scoring(id, 1), Some(2500));
        assert!(sink(&table, id).held_ball().is_none());
        assert!(sink(&table, id).pending_timer().is_none());
    }

    #[test]
    fn test_eject_from_fixed_release_with_spread() {
        let mut table = Table::new(7);
        let release = Vec2::new(100.0, 20.0);
        let id = add_sink(
            &mut table,
            Sink::new(CollisionAttributes::default(), 0.5)
                .with_release(release, Vec3::new(0.0, 1.0, 0.0))
                .with_throw(0.1, 10.0, 0.2),
        );
        let ball = add_ball(&mut table);
        table.collide(id, ball, &contact());
        table.advance(0.5);

        let b = table.ball(ball).unwrap();
        assert_eq!(b.position, release);
        assert!(b.speed >= 8.0 && b.speed <= 12.0);
        assert!(b.acceleration.y > 0.9);
    }

    #[test]
    #[should_panic(expected = "already holds")]
    fn test_second_capture_is_contract_violation() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        let first = add_ball(&mut table);
        let second = add_ball(&mut table);
        table.collide(id, first, &contact());
        table.collide(id, second, &contact());
    }

    #[test]
    fn test_tilted_sink_bounces() {
        let mut table = Table::new(0);
        table.context.tilt_locked = true;
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        let ball = add_ball(&mut table);
        table.collide(id, ball, &contact());

        let b = table.ball(ball).unwrap();
        assert!(b.active);
        assert!(b.speed > 0.0);
        assert!(sink(&table, id).held_ball().is_none());
        assert!(table.context.events().is_empty());
    }

    #[test]
    fn test_eject_message_reschedules() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        let ball = add_ball(&mut table);
        table.collide(id, ball, &contact());
        table.message(id, messages::SINK_EJECT, 0.25);
        assert_eq!(table.context.timers().len(), 1);
        assert_eq!(table.advance(0.25), 1);
        assert!(table.ball(ball).unwrap().active);

        table.message(id, messages::SINK_EJECT, -1.0);
        let timer = sink(&table, id).pending_timer().unwrap();
        assert!(table.context.timers().is_pending(timer));
        // Nothing held, the callback runs and just clears the timer
        assert_eq!(table.advance(1.0), 1);
        assert!(sink(&table, id).pending_timer().is_none());
    }

    #[test]
    fn test_player_change_swaps_message_field() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        let field = |t: &Table| sink(t, id).attributes().message_field;

        if let Some(Component::Sink(s)) = table.components.get_mut(id) {
            s.attributes_mut().message_field = 7;
        }
        table.message(id, messages::PLAYER_CHANGED, 1.0);
        assert_eq!(field(&table), 0);

        table.context.current_player = 1;
        table.message(id, messages::PLAYER_CHANGED, 0.0);
        assert_eq!(field(&table), 7);

        table.message(id, messages::RESET, 0.0);
        assert_eq!(field(&table), 0);
        table.message(id, messages::PLAYER_CHANGED, 1.0);
        assert_eq!(field(&table), 0);
    }

    #[test]
    #[should_panic(expected = "next player index out of range")]
    fn test_negative_player_index_is_contract_violation() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        table.message(id, messages::PLAYER_CHANGED, -1.0);
    }

    #[test]
    #[should_panic(expected = "next player index out of range")]
    fn test_nan_player_index_is_contract_violation() {
        let mut table = Table::new(0);
        let id = add_sink(&mut table, Sink::new(CollisionAttributes::default(), 1.0));
        table.message(id, messages::PLAYER_CHANGED, f32::NAN);
    }

    #[test]
    fn test_scoring_slots() {
        let mut s = Sink::new(CollisionAttributes::default(), 1.0);
        s.put_scoring(0, 100);
        s.put_scoring(2, 300);
        assert_eq!(s.get_scoring(0), 100);
        assert_eq!(s.get_scoring(1), 0);
        assert_eq!(s.get_scoring(2), 300);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_score_index_out_of_range() {
        let s = Sink::new(CollisionAttributes::default(), 1.0);
        s.get_scoring(3);
    }
}
