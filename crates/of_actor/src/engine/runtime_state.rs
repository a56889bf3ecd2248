//! Per-tick mutable state of one actor.
//!
//! Kinematic fields are written freely by the integrator. Bounded fields
//! (stamina, performance, confidence, pressure) are private and only change
//! through clamping setters, so no write can leave them out of range.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Confidence a fresh actor starts the match with.
pub const INITIAL_CONFIDENCE: f32 = 0.7;

pub const PERFORMANCE_MIN: f32 = 0.5;
pub const PERFORMANCE_MAX: f32 = 1.0;

/// Ball possession state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Possession {
    #[default]
    NoControl,
    Controlled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeState {
    pub(crate) position: Vector3<f32>,
    pub(crate) velocity: Vector3<f32>,
    /// Radians; the actor faces `(sin h, 0, cos h)`.
    pub(crate) heading: f32,
    /// Signed ground speed along the heading (negative = backpedalling).
    pub(crate) speed: f32,
    pub(crate) vertical_velocity: f32,
    pub(crate) grounded: bool,
    pub(crate) exhausted: bool,
    pub(crate) sprinting: bool,
    pub(crate) possession: Possession,

    stamina: f32,
    performance_modifier: f32,
    confidence: f32,
    pressure: f32,

    // === Timers ===
    /// Seconds since the last forward dribble touch.
    pub(crate) kick_timer: f32,
    /// Seconds until the next jump is allowed.
    pub(crate) jump_cooldown: f32,
    /// Seconds until a first touch may be attempted again.
    pub(crate) touch_recovery: f32,
}

impl RuntimeState {
    /// Grounded at `position`, facing +z, full stamina.
    pub fn new(position: Vector3<f32>, max_stamina: f32) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            heading: 0.0,
            speed: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
            exhausted: false,
            sprinting: false,
            possession: Possession::NoControl,
            stamina: max_stamina.max(0.0),
            performance_modifier: PERFORMANCE_MAX,
            confidence: INITIAL_CONFIDENCE,
            pressure: 0.0,
            kick_timer: 0.0,
            jump_cooldown: 0.0,
            touch_recovery: 0.0,
        }
    }

    // ========== Read accessors ==========

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Mirrors [`Possession::Controlled`].
    pub fn is_dribbling(&self) -> bool {
        self.possession == Possession::Controlled
    }

    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    pub fn possession(&self) -> Possession {
        self.possession
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn performance_modifier(&self) -> f32 {
        self.performance_modifier
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    pub fn kick_timer(&self) -> f32 {
        self.kick_timer
    }

    pub fn jump_cooldown(&self) -> f32 {
        self.jump_cooldown
    }

    pub fn touch_recovery(&self) -> f32 {
        self.touch_recovery
    }

    /// Unit facing vector on the ground plane.
    pub fn facing(&self) -> Vector3<f32> {
        Vector3::new(self.heading.sin(), 0.0, self.heading.cos())
    }

    // ========== Clamping setters ==========

    pub(crate) fn set_stamina(&mut self, value: f32, max_stamina: f32) {
        self.stamina = clamp_finite(value, 0.0, max_stamina.max(0.0), self.stamina);
    }

    pub(crate) fn set_performance_modifier(&mut self, value: f32) {
        self.performance_modifier =
            clamp_finite(value, PERFORMANCE_MIN, PERFORMANCE_MAX, self.performance_modifier);
    }

    pub(crate) fn set_confidence(&mut self, value: f32) {
        self.confidence = clamp_finite(value, 0.0, 1.0, self.confidence);
    }

    pub(crate) fn set_pressure(&mut self, value: f32) {
        self.pressure = clamp_finite(value, 0.0, 1.0, self.pressure);
    }

    pub(crate) fn adjust_confidence(&mut self, delta: f32) {
        self.set_confidence(self.confidence + delta);
    }

    pub(crate) fn set_heading(&mut self, heading: f32) {
        if heading.is_finite() {
            self.heading = wrap_angle(heading);
        }
    }
}

/// Clamp into `[lo, hi]`; non-finite input keeps `fallback`.
fn clamp_finite(value: f32, lo: f32, hi: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback.clamp(lo, hi)
    }
}

/// Wrap into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}
