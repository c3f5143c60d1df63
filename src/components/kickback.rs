//! Kickback: holds a resting ball, then fires it back up the lane
//!
//! The first contact arms the element and starts `timer_time`. While armed
//! the ball just bounces softly (threshold at [`NO_HIT`]). When the timer
//! fires the threshold drops to 0, so the next contact is a hard hit that
//! applies the boost; `timer_time2` then gives the ball time to leave before
//! the cycle is reported as finished.

use super::{
    CollisionAttributes, CollisionComponent, ComponentId, Contact, default_collision,
    play_optional, tilted_bounce,
};
use crate::consts::{NO_HIT, events, messages};
use crate::sim::{Ball, TableServices, TimerId};

#[derive(Debug, Clone)]
pub struct Kickback {
    attributes: CollisionAttributes,
    /// Delay between the first contact and the kick
    pub timer_time: f32,
    /// Delay after the kick before the element reports done
    pub timer_time2: f32,
    timer: Option<TimerId>,
    kick_active: bool,
}

impl Kickback {
    pub fn new(mut attributes: CollisionAttributes, timer_time: f32, timer_time2: f32) -> Self {
        attributes.threshold = NO_HIT;
        Self {
            attributes,
            timer_time,
            timer_time2,
            timer: None,
            kick_active: false,
        }
    }

    pub fn is_kick_active(&self) -> bool {
        self.kick_active
    }

    fn reset(&mut self, table: &mut dyn TableServices) {
        if let Some(timer) = self.timer.take() {
            table.cancel(timer);
            self.kick_active = false;
            self.attributes.threshold = NO_HIT;
        }
    }
}

impl CollisionComponent for Kickback {
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
        if code == messages::GAME_OVER || code == messages::RESET {
            self.reset(table);
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

        if !self.kick_active {
            self.attributes.threshold = NO_HIT;
            self.kick_active = true;
            // The cooldown timer from the previous kick may still be running
            if let Some(previous) = self.timer.take() {
                table.cancel(previous);
            }
            self.timer = Some(table.schedule(self.timer_time, id));
            log::debug!("Kickback {:?} armed", id);
        }

        if default_collision(&self.attributes, table, ball, contact) {
            self.kick_active = false;
        }
    }

    fn timer_expired(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        _timer: TimerId,
        _balls: &mut [Ball],
    ) {
        if self.kick_active {
            self.attributes.threshold = 0.0;
            self.timer = Some(table.schedule(self.timer_time2, id));
            play_optional(table, self.attributes.hard_hit_sound);
            log::debug!("Kickback {:?} firing", id);
        } else {
            self.timer = None;
            table.post_event(events::KICKBACK_RELEASED, id);
        }
    }

    fn pending_timer(&self) -> Option<TimerId> {
        self.timer
    }

    fn take_timer(&mut self) -> Option<TimerId> {
        self.timer.take()
    }
}
