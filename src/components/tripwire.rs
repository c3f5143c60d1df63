//! Tripwire: a pass-through trigger with no state of its own

use super::{CollisionAttributes, CollisionComponent, ComponentId, Contact, play_optional};
use crate::consts::events;
use crate::sim::{Ball, TableServices, TimerId};

#[derive(Debug, Clone)]
pub struct Tripwire {
    attributes: CollisionAttributes,
}

impl Tripwire {
    pub fn new(attributes: CollisionAttributes) -> Self {
        Self { attributes }
    }
}

impl CollisionComponent for Tripwire {
    fn attributes(&self) -> &CollisionAttributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut CollisionAttributes {
        &mut self.attributes
    }

    fn message(
        &mut self,
        _id: ComponentId,
        _table: &mut dyn TableServices,
        _code: i32,
        _value: f32,
    ) -> i32 {
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
        if !table.tilt_locked() {
            play_optional(table, self.attributes.soft_hit_sound);
            table.post_event(events::TRIGGER_HIT, id);
        }
    }

    fn timer_expired(
        &mut self,
        id: ComponentId,
        _table: &mut dyn TableServices,
        timer: TimerId,
        _balls: &mut [Ball],
    ) {
        log::warn!("Tripwire {:?} got unexpected {:?}", id, timer);
    }

    fn pending_timer(&self) -> Option<TimerId> {
        None
    }

    fn take_timer(&mut self) -> Option<TimerId> {
        None
    }
}
