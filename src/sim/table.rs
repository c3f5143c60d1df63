//! Table services and the driver facade
//!
//! Table elements never talk to audio, the event bus or the scheduler
//! directly; they go through [`TableServices`]. [`TableContext`] is the
//! in-crate implementation: it queues sounds and events for the host to
//! drain and owns the timer queue and the throw RNG.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::timer::{TimerId, TimerQueue};
use crate::components::{Component, ComponentArena, ComponentId, Contact};
use crate::settings::TableSettings;

/// Sound identifier from the table's sound list
pub type SoundId = u32;

/// Game event posted by a table element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEvent {
    pub code: i32,
    pub source: ComponentId,
}

/// What a table element may ask of the rest of the game
pub trait TableServices {
    /// True while the table is tilted and elements must not score
    fn tilt_locked(&self) -> bool;
    fn current_player(&self) -> usize;
    fn play_sound(&mut self, sound: SoundId);
    fn post_event(&mut self, code: i32, source: ComponentId);
    /// Fire `target`'s timer callback after `delay` seconds
    fn schedule(&mut self, delay: f32, target: ComponentId) -> TimerId;
    fn cancel(&mut self, timer: TimerId);
    /// Uniform in [0, 1)
    fn random_float(&mut self) -> f32;
}

#[derive(Debug, Clone)]
pub struct TableContext {
    pub tilt_locked: bool,
    pub current_player: usize,
    timers: TimerQueue<ComponentId>,
    rng: Pcg32,
    sounds: Vec<SoundId>,
    events: Vec<TableEvent>,
}

impl TableContext {
    pub fn new(seed: u64) -> Self {
        Self {
            tilt_locked: false,
            current_player: 0,
            timers: TimerQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            sounds: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn timers(&self) -> &TimerQueue<ComponentId> {
        &self.timers
    }

    /// Sounds requested since the last drain, oldest first
    pub fn sounds(&self) -> &[SoundId] {
        &self.sounds
    }

    /// Events posted since the last drain, oldest first
    pub fn events(&self) -> &[TableEvent] {
        &self.events
    }

    pub fn drain_sounds(&mut self) -> Vec<SoundId> {
        std::mem::take(&mut self.sounds)
    }

    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TableServices for TableContext {
    fn tilt_locked(&self) -> bool {
        self.tilt_locked
    }

    fn current_player(&self) -> usize {
        self.current_player
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }

    fn post_event(&mut self, code: i32, source: ComponentId) {
        self.events.push(TableEvent { code, source });
    }

    fn schedule(&mut self, delay: f32, target: ComponentId) -> TimerId {
        self.timers.set(delay, target)
    }

    fn cancel(&mut self, timer: TimerId) {
        if !self.timers.kill(timer) {
            log::debug!("Timer {:?} already gone", timer);
        }
    }

    fn random_float(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Table elements, balls and services wired together
#[derive(Debug)]
pub struct Table {
    pub context: TableContext,
    pub components: ComponentArena,
    pub balls: Vec<Ball>,
    next_ball_id: u32,
}

impl Table {
    pub fn new(seed: u64) -> Self {
        Self {
            context: TableContext::new(seed),
            components: ComponentArena::new(),
            balls: Vec::new(),
            next_ball_id: 1,
        }
    }

    /// Build a table and all of its elements from definitions
    pub fn from_settings(settings: &TableSettings) -> Self {
        let mut table = Self::new(settings.seed);
        table.context.tilt_locked = settings.tilt_locked;
        for def in &settings.components {
            table.add_component(Component::from_def(def));
        }
        log::info!(
            "Table ready: {} elements, seed {}",
            table.components.len(),
            settings.seed
        );
        table
    }

    pub fn add_component(&mut self, component: Component) -> ComponentId {
        let id = self.components.insert(component);
        log::debug!("Added {:?}", id);
        id
    }

    /// Remove an element, cancelling any timer it still owns
    pub fn remove_component(&mut self, id: ComponentId) -> Option<Component> {
        self.components.remove(id, &mut self.context)
    }

    /// Add a ball and return its id
    pub fn add_ball(&mut self, mut ball: Ball) -> u32 {
        ball.id = self.next_ball_id;
        self.next_ball_id += 1;
        let id = ball.id;
        self.balls.push(ball);
        id
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: u32) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    /// Deliver a resolved contact between a ball and an element.
    ///
    /// Returns false if either side is unknown, the element is disabled, or
    /// the ball already resolved this edge during the current tick.
    pub fn collide(&mut self, component: ComponentId, ball_id: u32, contact: &Contact) -> bool {
        let Some(ball) = self.balls.iter_mut().find(|b| b.id == ball_id) else {
            log::warn!("Contact for unknown ball {}", ball_id);
            return false;
        };
        if ball.already_hit(contact.edge) {
            log::debug!("Ball {} already resolved {:?} this tick", ball_id, contact.edge);
            return false;
        }
        self.components
            .collision(component, &mut self.context, ball, contact)
    }

    pub fn message(&mut self, component: ComponentId, code: i32, value: f32) -> Option<i32> {
        self.components
            .message(component, &mut self.context, code, value)
    }

    pub fn get_scoring(&self, component: ComponentId, index: usize) -> Option<i32> {
        self.components.get(component).map(|c| c.get_scoring(index))
    }

    pub fn put_scoring(&mut self, component: ComponentId, index: usize, score: i32) {
        if let Some(c) = self.components.get_mut(component) {
            c.put_scoring(index, score);
        }
    }

    /// Start a new tick: every ball may hit every edge again
    pub fn begin_tick(&mut self) {
        for ball in &mut self.balls {
            ball.clear_edge_marks();
        }
    }

    /// Advance the table clock and run every timer callback that came due.
    ///
    /// Returns the number of callbacks delivered.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.context.timers.advance_clock(dt);
        let mut fired = 0;
        while let Some((timer, target)) = self.context.timers.pop_due() {
            if self
                .components
                .fire_timer(timer, target, &mut self.context, &mut self.balls)
            {
                fired += 1;
            }
        }
        fired
    }
}
