//! Ball interaction: possession, dribble touches and charged shots.
//!
//! Possession is a two-state machine with hysteresis:
//!
//! ```text
//! NoControl --(distance <= r, good first touch)--> Controlled
//! Controlled --(distance > r × release_ratio)--> NoControl
//! ```
//!
//! Distances are full 3D, so a ball passing overhead is not controlled.

use crate::engine::ball::Ball;
use crate::engine::config::{ActorConfig, ShotConfig};
use crate::engine::derivation::DerivedConstants;
use crate::engine::execution_error::{
    check_first_touch_quality, check_lose_control, check_miss_kick, check_trip, yaw,
    ErrorProbabilities, Kick,
};
use crate::engine::physics_constants::{ball_control::*, shot};
use crate::engine::runtime_state::{Possession, RuntimeState};
use crate::models::attributes::{n100, ActorAttributes};
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy)]
pub struct ControlContext<'a> {
    pub derived: &'a DerivedConstants,
    pub attrs: &'a ActorAttributes,
    pub cfg: &'a ActorConfig,
    /// Live error chances for this tick.
    pub chances: ErrorProbabilities,
}

/// Possession transition observed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PossessionEvent {
    Unchanged,
    Acquired,
    /// Touch attempted and fumbled; the ball rebounds away.
    BadTouch,
    Released,
}

/// What a released shot gesture turned into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// Ball out of reach and not dribbling; the ball was not touched.
    Rejected { distance: f32, control_radius: f32 },
    Struck { direction: Vector3<f32>, power: f32, accuracy: f32 },
}

fn ball_distance(state: &RuntimeState, ball: &dyn Ball) -> f32 {
    (ball.position() - state.position()).norm()
}

/// Run the possession state machine for this tick.
pub fn update_possession<R: Rng + ?Sized>(
    ctx: &ControlContext<'_>,
    state: &mut RuntimeState,
    ball: &mut dyn Ball,
    rng: &mut R,
) -> PossessionEvent {
    let radius = ctx.derived.control_radius;
    let distance = ball_distance(state, ball);

    match state.possession {
        Possession::Controlled => {
            if distance > radius * ctx.cfg.release_radius_ratio {
                state.possession = Possession::NoControl;
                log::debug!("Possession lost at {:.2} m", distance);
                PossessionEvent::Released
            } else {
                PossessionEvent::Unchanged
            }
        }
        Possession::NoControl => {
            if distance > radius || state.touch_recovery > 0.0 {
                return PossessionEvent::Unchanged;
            }
            let touch = check_first_touch_quality(ctx.chances.bad_touch, state, ball, rng);
            if touch.was_bad_touch {
                state.touch_recovery = ctx.cfg.bad_touch_recovery;
                PossessionEvent::BadTouch
            } else {
                state.possession = Possession::Controlled;
                state.kick_timer = 0.0;
                log::debug!("Possession acquired at {:.2} m", distance);
                PossessionEvent::Acquired
            }
        }
    }
}

/// Poor dribblers push the ball further ahead on every touch.
fn loose_touch_mult(dribbling_skill: f32) -> f32 {
    let skill = if dribbling_skill.is_finite() { dribbling_skill.clamp(0.0, 1.0) } else { 0.0 };
    1.0 + LOOSE_TOUCH_EXTRA * (1.0 - skill)
}

/// Forward dribble touch force before error checks.
pub fn touch_force(state: &RuntimeState, derived: &DerivedConstants, attrs: &ActorAttributes) -> f32 {
    let passing = n100(attrs.technical.passing);
    let speed_ratio = (state.speed() / derived.max_forward_speed)
        .clamp(TOUCH_SPEED_RATIO_MIN, TOUCH_SPEED_RATIO_MAX);

    let mut force = derived.kick_force
        * (TOUCH_PASSING_BASE + TOUCH_PASSING_SHARE * passing)
        * speed_ratio
        * loose_touch_mult(derived.dribbling_skill)
        * state.performance_modifier();
    if state.is_sprinting() {
        force *= SPRINT_TOUCH_MULT;
    }
    if !state.is_grounded() {
        force *= AIRBORNE_TOUCH_MULT;
    }
    force
}

/// Dribble cadence while in possession. Forward touches go through
/// lose-control, miss-kick and trip; backward nudges are gentle and exact.
///
/// Returns the kick handed to the ball, if any.
pub fn dribble<R: Rng + ?Sized>(
    ctx: &ControlContext<'_>,
    state: &mut RuntimeState,
    ball: &mut dyn Ball,
    rng: &mut R,
) -> Option<Kick> {
    if state.possession != Possession::Controlled {
        return None;
    }
    let interval = ctx.derived.kick_interval;

    if state.speed() > DRIBBLE_MIN_SPEED {
        if state.kick_timer < interval {
            return None;
        }
        state.kick_timer = 0.0;

        let planned = Kick::new(state.facing(), touch_force(state, ctx.derived, ctx.attrs));
        let kick = check_lose_control(planned, ctx.chances.lose_control, state, ctx.derived, rng);
        let kick = check_miss_kick(kick, ctx.chances.miss_kick, state, rng);
        let kick = check_trip(kick, ctx.chances.trip, state, ctx.derived, rng);
        ball.kick(kick.direction, kick.force);
        log::trace!("Dribble touch: force {:.2}", kick.force);
        Some(kick)
    } else if state.speed() < -DRIBBLE_MIN_SPEED {
        if state.kick_timer < interval * BACKWARD_INTERVAL_MULT {
            return None;
        }
        state.kick_timer = 0.0;

        let force =
            ctx.derived.kick_force * BACKWARD_FORCE_RATIO * state.performance_modifier();
        let kick = Kick::new(-state.facing(), force);
        ball.kick(kick.direction, kick.force);
        Some(kick)
    } else {
        None
    }
}

/// Accuracy of a charge ratio: 1.0 inside the sweet-spot band, falling off
/// linearly with the distance to the band.
pub fn shot_accuracy(charge: f32, cfg: &ShotConfig) -> f32 {
    let charge = if charge.is_finite() { charge.clamp(0.0, 1.0) } else { 0.0 };
    let off_band = if charge < cfg.sweet_spot_min {
        cfg.sweet_spot_min - charge
    } else if charge > cfg.sweet_spot_max {
        charge - cfg.sweet_spot_max
    } else {
        0.0
    };
    (1.0 - off_band * cfg.accuracy_falloff).clamp(cfg.accuracy_min, 1.0)
}

/// Shot power before the stamina cost.
pub fn shot_power(state: &RuntimeState, attrs: &ActorAttributes, charge: f32) -> f32 {
    let t = &attrs.technical;
    let skill = shot::FINISHING_WEIGHT * n100(t.finishing)
        + shot::LONG_SHOTS_WEIGHT * n100(t.long_shots)
        + shot::TECHNIQUE_WEIGHT * n100(t.technique)
        + shot::STRENGTH_WEIGHT * n100(attrs.physical.strength);

    let mut power = (shot::POWER_BASE + shot::POWER_RANGE * charge)
        * (shot::SKILL_FLOOR + shot::SKILL_SHARE * skill)
        * state.performance_modifier()
        * (shot::CONFIDENCE_POWER_BASE + shot::CONFIDENCE_POWER_SHARE * state.confidence());
    if state.is_sprinting() {
        power *= shot::SPRINT_POWER_MULT;
    }
    if !state.is_grounded() {
        power *= shot::AIRBORNE_POWER_MULT;
    }
    power
}

/// Skill part of shot precision, `0..=1`.
fn shot_skill_accuracy(state: &RuntimeState, attrs: &ActorAttributes) -> f32 {
    let skill = shot::ACCURACY_FINISHING_WEIGHT * n100(attrs.technical.finishing)
        + shot::ACCURACY_TECHNIQUE_WEIGHT * n100(attrs.technical.technique)
        + shot::ACCURACY_COMPOSURE_WEIGHT * n100(attrs.mental.composure);
    let confidence =
        shot::ACCURACY_CONFIDENCE_BASE + shot::ACCURACY_CONFIDENCE_SHARE * state.confidence();
    (skill * confidence * state.performance_modifier()).clamp(0.0, 1.0)
}

/// Charged shot on release. `aim` is flattened onto the ground plane; a
/// degenerate aim falls back to the heading.
pub fn take_shot<R: Rng + ?Sized>(
    ctx: &ControlContext<'_>,
    state: &mut RuntimeState,
    ball: &mut dyn Ball,
    charge: f32,
    aim: Vector3<f32>,
    rng: &mut R,
) -> ShotOutcome {
    let radius = ctx.derived.control_radius;
    let distance = ball_distance(state, ball);
    if distance > radius && !state.is_dribbling() {
        log::debug!("Shot rejected: ball {:.2} m away (reach {:.2} m)", distance, radius);
        return ShotOutcome::Rejected { distance, control_radius: radius };
    }

    let charge = if charge.is_finite() { charge.clamp(0.0, 1.0) } else { 0.0 };
    let power = shot_power(state, ctx.attrs, charge);
    let accuracy = shot_accuracy(charge, &ctx.cfg.shot);

    let mut flat = Vector3::new(aim.x, 0.0, aim.z);
    if !flat.iter().all(|c| c.is_finite()) {
        flat = Vector3::zeros();
    }
    let mut direction = flat.try_normalize(1e-4).unwrap_or_else(|| state.facing());

    let spread = ctx.cfg.shot.max_spread_rad * (1.0 - accuracy * shot_skill_accuracy(state, ctx.attrs));
    if spread > 0.0 {
        if let Ok(normal) = Normal::new(0.0, spread * 0.5) {
            let angle: f32 = normal.sample(rng);
            direction = yaw(direction, angle.clamp(-spread, spread));
        }
    }

    direction.y = shot::LOFT_BASE + shot::LOFT_CHARGE * charge;
    let direction = direction.try_normalize(1e-6).unwrap_or_else(|| state.facing());

    ball.kick(direction, power);
    state.set_stamina(
        state.stamina() - power * ctx.cfg.shot.stamina_per_power,
        ctx.derived.max_stamina,
    );
    state.possession = Possession::NoControl;
    state.touch_recovery = ctx.cfg.bad_touch_recovery;
    state.kick_timer = 0.0;

    log::debug!("Shot: charge {:.2}, power {:.1}, accuracy {:.2}", charge, power, accuracy);
    ShotOutcome::Struck { direction, power, accuracy }
}
