//! Light rollover: each pass toggles the light
//!
//! A pass over an unlit rollover lights it and scores. The next pass toggles
//! it off, but the light stays on for `delay` seconds past that contact.

use super::{CollisionAttributes, CollisionComponent, ComponentId, Contact, play_optional};
use crate::consts::{events, messages};
use crate::sim::{Ball, TableServices, TimerId};

#[derive(Debug, Clone)]
pub struct LightRollover {
    attributes: CollisionAttributes,
    /// Seconds the light stays on after the toggling-off contact
    pub delay: f32,
    timer: Option<TimerId>,
    lit: bool,
    light_on: bool,
}

impl LightRollover {
    pub fn new(attributes: CollisionAttributes, delay: f32) -> Self {
        Self {
            attributes,
            delay,
            timer: None,
            lit: false,
            light_on: false,
        }
    }

    /// Rollover state flipped by every pass
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Visible light, which outlasts `is_lit` while the delayed off is pending
    pub fn is_light_on(&self) -> bool {
        self.light_on
    }
}

impl CollisionComponent for LightRollover {
    fn attributes(&self) -> &CollisionAttributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut CollisionAttributes {
        &mut self.attributes
    }

    fn message(
        &mut self,
        _id: ComponentId,
        table: &mut dyn TableServices,
        code: i32,
        _value: f32,
    ) -> i32 {
        if code == messages::RESET {
            if let Some(timer) = self.timer.take() {
                table.cancel(timer);
            }
            self.lit = false;
            self.light_on = false;
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
        ball.position = contact.next_position;
        ball.ray_max_distance -= contact.coef;
        ball.not_again(contact.edge);
        if table.tilt_locked() {
            return;
        }

        if self.lit {
            if self.timer.is_none() {
                self.timer = Some(table.schedule(self.delay, id));
            }
        } else {
            self.light_on = true;
            play_optional(table, self.attributes.soft_hit_sound);
            table.post_event(events::TRIGGER_HIT, id);
        }
        self.lit = !self.lit;
    }

    fn timer_expired(
        &mut self,
        id: ComponentId,
        _table: &mut dyn TableServices,
        _timer: TimerId,
        _balls: &mut [Ball],
    ) {
        self.timer = None;
        // Relit while the off was pending: keep the light
        self.light_on = self.lit;
        log::debug!("Rollover {:?} light {}", id, if self.light_on { "kept" } else { "off" });
    }

    fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    fn take_timer(&mut self) -> Option<TimerId> {
        self.timer.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::sim::{EdgeId, Table};
    use glam::Vec2;

    const SOFT: u32 = 2;
    const HARD: u32 = 8;

    fn setup() -> (Table, ComponentId, u32) {
        let mut table = Table::new(0);
        let attributes = CollisionAttributes {
            soft_hit_sound: Some(SOFT),
            hard_hit_sound: Some(HARD),
            ..Default::default()
        };
        let id = table.add_component(Component::LightRollover(LightRollover::new(attributes, 0.5)));
        let mut ball = Ball::new(0);
        ball.ray_max_distance = 4.0;
        let ball = table.add_ball(ball);
        (table, id, ball)
    }

    fn contact(edge: u32) -> Contact {
        Contact {
            next_position: Vec2::new(7.0, 1.0),
            direction: Vec2::Y,
            coef: 1.0,
            edge: EdgeId(edge),
        }
    }

    fn rollover(table: &Table, id: ComponentId) -> &LightRollover {
        match table.components.get(id) {
            Some(Component::LightRollover(r)) => r,
            _ => panic!("not a light rollover"),
        }
    }

    /// One pass per tick
    fn pass(table: &mut Table, id: ComponentId, ball: u32) {
        table.begin_tick();
        assert!(table.collide(id, ball, &contact(1)));
    }

    #[test]
    fn test_first_pass_lights_and_stays_lit() {
        let (mut table, id, ball) = setup();
        pass(&mut table, id, ball);

        assert!(rollover(&table, id).is_lit());
        assert!(rollover(&table, id).is_light_on());
        assert_eq!(table.context.sounds(), &[SOFT]);
        assert_eq!(table.context.events().len(), 1);
        assert!(table.context.timers().is_empty());
        let b = table.ball(ball).unwrap();
        assert_eq!(b.position, Vec2::new(7.0, 1.0));
        assert_eq!(b.ray_max_distance, 3.0);

        assert_eq!(table.advance(1.0), 0);
        assert!(rollover(&table, id).is_lit());
        assert!(rollover(&table, id).is_light_on());
    }

    #[test]
    fn test_second_pass_starts_delayed_off() {
        let (mut table, id, ball) = setup();
        pass(&mut table, id, ball);
        pass(&mut table, id, ball);

        let r = rollover(&table, id);
        assert!(!r.is_lit());
        assert!(r.is_light_on());
        assert!(r.pending_timer().is_some());
        assert_eq!(table.context.timers().len(), 1);
        // Toggling off does not score again
        assert_eq!(table.context.events().len(), 1);
        assert_eq!(table.context.sounds(), &[SOFT]);

        assert_eq!(table.advance(0.25), 0);
        assert!(rollover(&table, id).is_light_on());
        assert_eq!(table.advance(0.25), 1);
        assert!(!rollover(&table, id).is_light_on());
        assert!(rollover(&table, id).pending_timer().is_none());
    }

    #[test]
    fn test_pending_off_is_not_rescheduled() {
        let (mut table, id, ball) = setup();
        pass(&mut table, id, ball);
        pass(&mut table, id, ball);
        let pending = rollover(&table, id).pending_timer();

        // Relight, then toggle off again while the first off is still pending
        pass(&mut table, id, ball);
        assert!(rollover(&table, id).is_lit());
        assert_eq!(table.context.events().len(), 2);
        pass(&mut table, id, ball);

        assert_eq!(rollover(&table, id).pending_timer(), pending);
        assert_eq!(table.context.timers().len(), 1);
    }

    #[test]
    fn test_relit_during_delay_keeps_light() {
        let (mut table, id, ball) = setup();
        pass(&mut table, id, ball);
        pass(&mut table, id, ball);
        pass(&mut table, id, ball);
        assert_eq!(table.advance(0.5), 1);
        assert!(rollover(&table, id).is_lit());
        assert!(rollover(&table, id).is_light_on());
    }

    #[test]
    fn test_reset_turns_off_and_cancels() {
        let (mut table, id, ball) = setup();
        pass(&mut table, id, ball);
        pass(&mut table, id, ball);
        table.message(id, messages::RESET, 0.0);
        assert!(!rollover(&table, id).is_lit());
        assert!(!rollover(&table, id).is_light_on());
        assert!(table.context.timers().is_empty());
    }

    #[test]
    fn test_tilted_contact_does_not_light() {
        let (mut table, id, ball) = setup();
        table.context.tilt_locked = true;
        pass(&mut table, id, ball);
        assert!(!rollover(&table, id).is_lit());
        assert!(table.context.sounds().is_empty());
        assert!(table.context.timers().is_empty());
        assert!(table.ball(ball).unwrap().already_hit(EdgeId(1)));
    }
}
