//! Stamina and pressure tuning.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StaminaConfig {
    // === Drain ===
    /// |speed| above which the actor drains instead of recovering (m/s) (default: 0.5)
    pub moving_speed_threshold: f32,
    /// Base drain while moving (points/s) (default: 1.5)
    pub base_drain_rate: f32,
    /// Drain multiplier while sprinting (default: 3.0)
    pub sprint_drain_mult: f32,
    /// Drain multiplier while dribbling (default: 1.5)
    pub dribble_drain_mult: f32,
    /// Drain multiplier while airborne (default: 2.0)
    pub airborne_drain_mult: f32,
    /// Work-rate factor is `work_rate_drain_base - work_rate/100` (default: 1.5)
    pub work_rate_drain_base: f32,

    // === Thresholds ===
    /// Stamina ratio under which the actor is exhausted (default: 0.2)
    pub exhausted_ratio: f32,

    // === Action costs ===
    /// Stamina points per jump (default: 3.0)
    pub jump_cost: f32,

    // === Pressure ===
    /// Pressure gained per second while dribbling fast (default: 0.15)
    pub pressure_rise_rate: f32,
    /// Pressure lost per second otherwise (default: 0.08)
    pub pressure_decay_rate: f32,
    /// Share of top speed above which dribbling builds pressure (default: 0.8)
    pub pressure_speed_ratio: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            moving_speed_threshold: 0.5,
            base_drain_rate: 1.5,
            sprint_drain_mult: 3.0,
            dribble_drain_mult: 1.5,
            airborne_drain_mult: 2.0,
            work_rate_drain_base: 1.5,

            exhausted_ratio: 0.2,

            jump_cost: 3.0,

            pressure_rise_rate: 0.15,
            pressure_decay_rate: 0.08,
            pressure_speed_ratio: 0.8,
        }
    }
}
