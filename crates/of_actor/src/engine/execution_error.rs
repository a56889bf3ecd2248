//! # Execution Errors
//!
//! **Intent + error = actual result.**
//!
//! Four independent failure modes, each with a baseline chance that drops
//! linearly with a skill average, then trait multipliers, then a floor:
//!
//! | Mode | Skills | Live factors |
//! |---|---|---|
//! | miss-kick | technique, passing, finishing | pressure |
//! | trip | balance, agility, dribbling | fatigue |
//! | bad touch | first touch, technique, composure | pressure |
//! | lose control | dribbling, balance, concentration | pressure, fatigue |
//!
//! Failures are ordinary outcomes: every check returns the same kick type
//! whether it fired or not, and the ball is kicked either way.

use crate::engine::ball::Ball;
use crate::engine::derivation::DerivedConstants;
use crate::engine::physics_constants::error_model::*;
use crate::engine::runtime_state::RuntimeState;
use crate::models::attributes::{n100, ActorAttributes};
use crate::models::traits::{TraitSet, TraitTarget};
use nalgebra::{Rotation3, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chance of each failure mode, each in `[ERROR_FLOOR, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorProbabilities {
    pub miss_kick: f32,
    pub trip: f32,
    pub bad_touch: f32,
    pub lose_control: f32,
}

impl ErrorProbabilities {
    pub fn values(&self) -> [f32; 4] {
        [self.miss_kick, self.trip, self.bad_touch, self.lose_control]
    }

    fn clamped(self) -> Self {
        Self {
            miss_kick: clamp_chance(self.miss_kick),
            trip: clamp_chance(self.trip),
            bad_touch: clamp_chance(self.bad_touch),
            lose_control: clamp_chance(self.lose_control),
        }
    }
}

/// Clamp a chance into `[ERROR_FLOOR, 1.0]`.
pub fn clamp_chance(chance: f32) -> f32 {
    if chance.is_finite() {
        chance.clamp(ERROR_FLOOR, 1.0)
    } else {
        1.0
    }
}

/// Chance actually rolled for a check: `chance × (2 − performance)`,
/// re-clamped so a tired actor never exceeds certainty.
pub fn performance_scaled(chance: f32, performance_modifier: f32) -> f32 {
    clamp_chance(chance * (2.0 - performance_modifier))
}

/// Baselines of one actor plus the skills that shape the live context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorModel {
    pub baseline: ErrorProbabilities,
    /// Composure 0..1; damps pressure.
    composure: f32,
    /// Trait multiplier on pressure effects.
    pressure_sensitivity: f32,
}

impl Default for ErrorModel {
    fn default() -> Self {
        Self::from_profile(&ActorAttributes::default(), &TraitSet::default())
    }
}

impl ErrorModel {
    pub fn from_profile(attrs: &ActorAttributes, traits: &TraitSet) -> Self {
        let t = &attrs.technical;
        let m = &attrs.mental;
        let p = &attrs.physical;
        let avg3 = |a: u8, b: u8, c: u8| (n100(a) + n100(b) + n100(c)) / 3.0;

        let miss_skill = avg3(t.technique, t.passing, t.finishing);
        let trip_skill = avg3(p.balance, p.agility, t.dribbling);
        let touch_skill = avg3(t.first_touch, t.technique, m.composure);
        let control_skill = avg3(t.dribbling, p.balance, m.concentration);

        let baseline = ErrorProbabilities {
            miss_kick: (MISS_KICK_BASE - MISS_KICK_SLOPE * miss_skill)
                * traits.multiplier(TraitTarget::MissKickChance),
            trip: (TRIP_BASE - TRIP_SLOPE * trip_skill) * traits.multiplier(TraitTarget::TripChance),
            bad_touch: (BAD_TOUCH_BASE - BAD_TOUCH_SLOPE * touch_skill)
                * traits.multiplier(TraitTarget::BadTouchChance),
            lose_control: (LOSE_CONTROL_BASE - LOSE_CONTROL_SLOPE * control_skill)
                * traits.multiplier(TraitTarget::LoseControlChance),
        }
        .clamped();

        Self {
            baseline,
            composure: n100(m.composure),
            pressure_sensitivity: traits.multiplier(TraitTarget::PressureSensitivity),
        }
    }

    /// Baselines adjusted for the live pressure level and stamina ratio.
    pub fn with_context(&self, pressure: f32, stamina_ratio: f32) -> ErrorProbabilities {
        let pressure = if pressure.is_finite() { pressure.clamp(0.0, 1.0) } else { 0.0 };
        let ratio = if stamina_ratio.is_finite() { stamina_ratio.clamp(0.0, 1.0) } else { 1.0 };

        let pressure_factor =
            1.0 + pressure * PRESSURE_WEIGHT * (1.0 - self.composure) * self.pressure_sensitivity;
        let fatigue_factor = 1.0 + (1.0 - ratio) * FATIGUE_WEIGHT;

        let b = &self.baseline;
        ErrorProbabilities {
            miss_kick: b.miss_kick * pressure_factor,
            trip: b.trip * fatigue_factor,
            bad_touch: b.bad_touch * pressure_factor,
            lose_control: b.lose_control * pressure_factor * fatigue_factor,
        }
        .clamped()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kick {
    pub direction: Vector3<f32>,
    pub force: f32,
}

impl Kick {
    pub fn new(direction: Vector3<f32>, force: f32) -> Self {
        Self { direction, force }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstTouch {
    pub is_good_touch: bool,
    pub was_bad_touch: bool,
}

fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.gen::<f32>() < chance
}

/// Rotate about the vertical axis.
pub(crate) fn yaw(direction: Vector3<f32>, angle: f32) -> Vector3<f32> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * direction
}

/// Miss-kick: with the performance-scaled chance, skews the direction by up to
/// `MISS_KICK_MAX_ANGLE_RAD` and pushes the force up.
pub fn check_miss_kick<R: Rng + ?Sized>(
    kick: Kick,
    chance: f32,
    state: &mut RuntimeState,
    rng: &mut R,
) -> Kick {
    let p = performance_scaled(chance, state.performance_modifier());
    if !roll(rng, p) {
        state.adjust_confidence(CONFIDENCE_GAIN);
        return kick;
    }

    let angle = rng.gen_range(-MISS_KICK_MAX_ANGLE_RAD..=MISS_KICK_MAX_ANGLE_RAD);
    let force_mult = rng.gen_range(MISS_KICK_FORCE_MIN_MULT..=MISS_KICK_FORCE_MAX_MULT);
    state.adjust_confidence(-CONFIDENCE_LOSS);
    log::trace!("Miss-kick: {:.2} rad, force x{:.2}", angle, force_mult);
    Kick::new(yaw(kick.direction, angle), kick.force * force_mult)
}

/// Trip: only above `TRIP_SPEED_RATIO` of top forward speed. A stumble
/// over-hits the ball and costs stamina.
pub fn check_trip<R: Rng + ?Sized>(
    kick: Kick,
    chance: f32,
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    rng: &mut R,
) -> Kick {
    if state.speed().abs() <= TRIP_SPEED_RATIO * derived.max_forward_speed {
        return kick;
    }
    if !roll(rng, clamp_chance(chance)) {
        return kick;
    }

    state.set_stamina(state.stamina() - TRIP_STAMINA_COST, derived.max_stamina);
    state.adjust_confidence(-CONFIDENCE_LOSS);
    log::trace!("Trip at {:.2} m/s", state.speed());
    Kick::new(kick.direction, kick.force * TRIP_FORCE_MULT)
}

/// Lose control: a sprinting touch may be over-hit.
pub fn check_lose_control<R: Rng + ?Sized>(
    kick: Kick,
    chance: f32,
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    rng: &mut R,
) -> Kick {
    if !state.is_sprinting()
        || state.speed() <= LOSE_CONTROL_SPEED_RATIO * derived.max_forward_speed
    {
        return kick;
    }
    let p = performance_scaled(chance, state.performance_modifier());
    if !roll(rng, p) {
        return kick;
    }

    state.adjust_confidence(-CONFIDENCE_LOSS);
    log::trace!("Lost control at {:.2} m/s", state.speed());
    Kick::new(kick.direction, kick.force * LOSE_CONTROL_FORCE_MULT)
}

/// First touch on arrival of the ball. A bad touch rebounds the ball away
/// from the actor instead of settling it.
pub fn check_first_touch_quality<R: Rng + ?Sized>(
    chance: f32,
    state: &mut RuntimeState,
    ball: &mut dyn Ball,
    rng: &mut R,
) -> FirstTouch {
    let p = performance_scaled(chance, state.performance_modifier());
    if !roll(rng, p) {
        state.adjust_confidence(CONFIDENCE_GAIN);
        return FirstTouch { is_good_touch: true, was_bad_touch: false };
    }

    let mut away = ball.position() - state.position();
    away.y = 0.0;
    let away = away.try_normalize(1e-4).unwrap_or_else(|| state.facing());
    let angle = rng.gen_range(-BAD_TOUCH_MAX_DEFLECTION_RAD..=BAD_TOUCH_MAX_DEFLECTION_RAD);
    let force = rng.gen_range(BAD_TOUCH_FORCE_MIN..=BAD_TOUCH_FORCE_MAX);

    ball.kick(yaw(away, angle), force);
    state.adjust_confidence(-CONFIDENCE_LOSS);
    log::trace!("Bad touch: ball rebounds at {:.2}", force);
    FirstTouch { is_good_touch: false, was_bad_touch: true }
}
