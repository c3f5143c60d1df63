//! Table definitions
//!
//! Loaded from JSON handed over by the table loader. Every element type has
//! its own definition struct; the shared collision attributes are flattened
//! into it.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::CollisionAttributes;
use crate::consts::*;
use crate::error::Result;
use crate::sim::SoundId;

/// Kickback definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KickbackDef {
    #[serde(flatten)]
    pub attributes: CollisionAttributes,
    #[serde(default = "default_kickback_timer_time")]
    pub timer_time: f32,
    #[serde(default = "default_kickback_timer_time2")]
    pub timer_time2: f32,
}

/// Light rollover definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightRolloverDef {
    #[serde(flatten)]
    pub attributes: CollisionAttributes,
    /// Seconds the light stays on after the rollover is toggled off
    #[serde(default = "default_light_rollover_delay")]
    pub delay: f32,
}

/// Fixed point a sink releases its ball from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinkRelease {
    pub position: Vec2,
    pub acceleration: Vec3,
}

/// Sink definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkDef {
    #[serde(flatten)]
    pub attributes: CollisionAttributes,
    #[serde(default = "default_sink_timer_time")]
    pub timer_time: f32,
    /// Release where the ball was captured when absent
    #[serde(default)]
    pub release: Option<SinkRelease>,
    #[serde(default)]
    pub throw_angle_mult: f32,
    #[serde(default)]
    pub throw_speed_mult1: f32,
    #[serde(default)]
    pub throw_speed_mult2: f32,
    #[serde(default)]
    pub capture_sound: Option<SoundId>,
    #[serde(default)]
    pub eject_sound: Option<SoundId>,
}

/// Tripwire definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripwireDef {
    #[serde(flatten)]
    pub attributes: CollisionAttributes,
}

/// One table element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentDef {
    Kickback(KickbackDef),
    LightRollover(LightRolloverDef),
    Sink(SinkDef),
    Tripwire(TripwireDef),
}

/// A whole table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Seed for the ball throw RNG
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub tilt_locked: bool,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
}

impl TableSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a table definition file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded {} table elements from {}",
            settings.components.len(),
            path.display()
        );
        Ok(settings)
    }
}

fn default_kickback_timer_time() -> f32 {
    KICKBACK_TIMER_TIME
}

fn default_kickback_timer_time2() -> f32 {
    KICKBACK_TIMER_TIME2
}

fn default_light_rollover_delay() -> f32 {
    LIGHT_ROLLOVER_DELAY
}

fn default_sink_timer_time() -> f32 {
    SINK_TIMER_TIME
}
