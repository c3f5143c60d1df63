//! Cadet Collide - 2D pinball collision core
//!
//! Core modules:
//! - `sim`: Geometry, ray queries, collision response, ball state, timers
//! - `components`: Table elements reacting to ball contact (kickback,
//!   light rollover, sink, tripwire)
//! - `settings`: Data-driven table element definitions

pub mod components;
pub mod error;
pub mod settings;
pub mod sim;

pub use components::{CollisionComponent, Component, ComponentArena, ComponentId, Contact};
pub use error::{Error, Result};
pub use settings::TableSettings;
pub use sim::{Ball, Table, TableContext, TableServices};

/// Table physics constants
pub mod consts {
    /// Distance returned by every query that found nothing
    pub const NO_HIT: f32 = 1_000_000_000.0;

    /// Impact speed below which no hit sound is played
    pub const SOFT_HIT_MIN_SPEED: f32 = 0.2;

    /// Collision attribute defaults for elements without visual data
    pub const DEFAULT_ELASTICITY: f32 = 0.6;
    pub const DEFAULT_SMOOTHNESS: f32 = 0.95;
    pub const DEFAULT_THRESHOLD: f32 = 8.999_999_9e10;
    pub const DEFAULT_BOOST: f32 = 0.0;

    /// Kickback arm delay and re-arm cooldown (seconds)
    pub const KICKBACK_TIMER_TIME: f32 = 0.7;
    pub const KICKBACK_TIMER_TIME2: f32 = 0.1;

    /// Light rollover lit hold time (seconds)
    pub const LIGHT_ROLLOVER_DELAY: f32 = 0.2;

    /// Sink hold time (seconds)
    pub const SINK_TIMER_TIME: f32 = 1.0;

    /// Score slots held by a sink
    pub const SINK_SCORE_SLOTS: usize = 3;
    /// Players whose message field a sink remembers
    pub const MAX_PLAYERS: usize = 4;

    /// Game-event codes posted to the table control
    pub mod events {
        /// Rollover, tripwire or sink was triggered
        pub const TRIGGER_HIT: i32 = 63;
        /// Kickback finished its cycle
        pub const KICKBACK_RELEASED: i32 = 60;
    }

    /// Message codes understood by table elements
    pub mod messages {
        /// Sink: eject after `value` seconds (negative = default hold time)
        pub const SINK_EJECT: i32 = 56;
        pub const GAME_OVER: i32 = 1011;
        /// Sink: `value` is the index of the player taking over
        pub const PLAYER_CHANGED: i32 = 1020;
        pub const RESET: i32 = 1024;
    }
}
