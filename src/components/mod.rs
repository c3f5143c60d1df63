//! Table elements that react to ball contact
//!
//! Every element implements [`CollisionComponent`]. The set of elements is
//! closed: [`Component`] has one variant per behavior and dispatches to it.
//! Elements live in a [`ComponentArena`] and are addressed by
//! [`ComponentId`], which is also what timers carry back to them.

pub mod arena;
pub mod kickback;
pub mod light_rollover;
pub mod sink;
pub mod tripwire;

pub use arena::{ComponentArena, ComponentId};
pub use kickback::Kickback;
pub use light_rollover::LightRollover;
pub use sink::Sink;
pub use tripwire::Tripwire;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::ComponentDef;
use crate::sim::{Ball, EdgeId, SoundId, TableServices, TimerId, basic_collision};

/// Physical and audio attributes every element carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionAttributes {
    /// Table geometry group this element observes
    pub group_index: i32,
    /// Disabled elements ignore contacts
    pub active: bool,
    pub elasticity: f32,
    pub smoothness: f32,
    /// Extra speed along the normal on a hard hit
    pub boost: f32,
    /// Impact speed separating soft from hard hits
    pub threshold: f32,
    pub soft_hit_sound: Option<SoundId>,
    pub hard_hit_sound: Option<SoundId>,
    /// Per-player value some elements swap on player change
    #[serde(skip)]
    pub message_field: i32,
}

impl Default for CollisionAttributes {
    fn default() -> Self {
        Self {
            group_index: 0,
            active: true,
            elasticity: DEFAULT_ELASTICITY,
            smoothness: DEFAULT_SMOOTHNESS,
            boost: DEFAULT_BOOST,
            threshold: DEFAULT_THRESHOLD,
            soft_hit_sound: None,
            hard_hit_sound: None,
            message_field: 0,
        }
    }
}

/// A resolved contact, as found by the driver's nearest-hit search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Where the ball ends up (contact point or next free position)
    pub next_position: Vec2,
    /// Contact normal
    pub direction: Vec2,
    /// Ray distance consumed by this contact
    pub coef: f32,
    pub edge: EdgeId,
}

/// Contract between the collision core and a table element
pub trait CollisionComponent {
    fn attributes(&self) -> &CollisionAttributes;

    fn attributes_mut(&mut self) -> &mut CollisionAttributes;

    /// Generic control channel; codes are in [`crate::consts::messages`]
    fn message(&mut self, id: ComponentId, table: &mut dyn TableServices, code: i32, value: f32)
    -> i32;

    /// Ball hit this element
    fn collision(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        ball: &mut Ball,
        contact: &Contact,
    );

    /// A timer this element scheduled came due
    fn timer_expired(
        &mut self,
        id: ComponentId,
        table: &mut dyn TableServices,
        timer: TimerId,
        balls: &mut [Ball],
    );

    /// Timer currently owned by this element
    fn pending_timer(&self) -> Option<TimerId>;

    /// Give up ownership of the pending timer without cancelling it
    fn take_timer(&mut self) -> Option<TimerId>;

    fn get_scoring(&self, _index: usize) -> i32 {
        0
    }

    fn put_scoring(&mut self, _index: usize, _score: i32) {}

    /// Called once before the element is dropped
    fn destroy(&mut self, table: &mut dyn TableServices) {
        if let Some(timer) = self.take_timer() {
            table.cancel(timer);
        }
    }
}

pub(crate) fn play_optional(table: &mut dyn TableServices, sound: Option<SoundId>) {
    if let Some(sound) = sound {
        table.play_sound(sound);
    }
}

/// Plain bounce with no scoring, used while the table is tilted
pub(crate) fn tilted_bounce(attributes: &CollisionAttributes, ball: &mut Ball, contact: &Contact) {
    basic_collision(
        ball,
        contact.next_position,
        contact.direction,
        attributes.elasticity,
        attributes.smoothness,
        NO_HIT,
        0.0,
    );
}

/// Bounce off an element and play its hit sound.
///
/// Returns true on a hard hit (impact speed above the element's threshold).
pub fn default_collision(
    attributes: &CollisionAttributes,
    table: &mut dyn TableServices,
    ball: &mut Ball,
    contact: &Contact,
) -> bool {
    if table.tilt_locked() {
        tilted_bounce(attributes, ball, contact);
        return false;
    }

    let proj_speed = basic_collision(
        ball,
        contact.next_position,
        contact.direction,
        attributes.elasticity,
        attributes.smoothness,
        attributes.threshold,
        attributes.boost,
    );
    if proj_speed <= attributes.threshold {
        if proj_speed > SOFT_HIT_MIN_SPEED {
            play_optional(table, attributes.soft_hit_sound);
        }
        return false;
    }

    play_optional(table, attributes.hard_hit_sound);
    true
}

/// A table element
#[derive(Debug, Clone)]
pub enum Component {
    Kickback(Kickback),
    LightRollover(LightRollover),
    Sink(Sink),
    Tripwire(Tripwire),
}

impl Component {
    pub fn from_def(def: &ComponentDef) -> Self {
        match def {
            ComponentDef::Kickback(d) => Component::Kickback(Kickback::new(
                d.attributes.clone(),
                d.timer_time,
                d.timer_time2,
            )),
            ComponentDef::LightRollover(d) => {
                Component::LightRollover(LightRollover::new(d.attributes.clone(), d.delay))
            }
            ComponentDef::Sink(d) => Component::Sink(Sink::from_def(d)),
            ComponentDef::Tripwire(d) => Component::Tripwire(Tripwire::new(d.attributes.clone())),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Component::Kickback(_) => "kickback",
            Component::LightRollover(_) => "light_rollover",
            Component::Sink(_) => "sink",
            Component::Tripwire(_) => "tripwire",
        }
    }

    pub fn as_dyn(&self) -> &dyn CollisionComponent {
        match self {
            Component::Kickback(c) => c,
            Component::LightRollover(c) => c,
            Component::Sink(c) => c,
            Component::Tripwire(c) => c,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn CollisionComponent {
        match self {
            Component::Kickback(c) => c,
            Component::LightRollover(c) => c,
            Component::Sink(c) => c,
            Component::Tripwire(c) => c,
        }
    }

    pub fn is_active(&self) -> bool {
        self.as_dyn().attributes().active
    }

    pub fn set_active(&mut self, active: bool) {
        self.as_dyn_mut().attributes_mut().active = active;
    }

    pub fn get_scoring(&self, index: usize) -> i32 {
        self.as_dyn().get_scoring(index)
    }

    pub fn put_scoring(&mut self, index: usize, score: i32) {
        self.as_dyn_mut().put_scoring(index, score);
    }
}
