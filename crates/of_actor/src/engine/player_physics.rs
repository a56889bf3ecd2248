//! Actor kinematics: turn, jump, gravity, ground movement, boundary clamp.
//!
//! Ground speed is a signed scalar along the heading (negative while
//! backpedalling). Every step is explicit Euler over the tick's Δt; the
//! orchestrator caps Δt, so one step never jumps further than
//! `top speed × max_tick_dt`.

use crate::engine::config::{ActorConfig, PlayBounds};
use crate::engine::derivation::DerivedConstants;
use crate::engine::input::IntentSnapshot;
use crate::engine::physics_constants::kinematics::{AIR_CONTROL, SPRINT_TURN_MULT};
use crate::engine::runtime_state::RuntimeState;
use serde::{Deserialize, Serialize};

/// Why a jump did or did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum JumpOutcome {
    Jumped { take_off_speed: f32 },
    /// Already in the air; silently ignored.
    Airborne,
    OnCooldown { remaining: f32 },
    NoStamina { stamina: f32, cost: f32 },
}

/// Move `current` toward `target` by at most `max_delta`.
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_delta {
        target
    } else {
        current + diff.signum() * max_delta
    }
}

/// Rotate the heading by the turn intent.
pub fn apply_turn(
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    intent: &IntentSnapshot,
    dt: f32,
) {
    let axis = intent.turn_axis();
    if axis == 0.0 {
        return;
    }
    let mut rate = derived.turn_speed;
    if state.is_sprinting() {
        rate *= SPRINT_TURN_MULT;
    }
    state.set_heading(state.heading() + axis * rate * dt);
}

/// Take off if grounded, off cooldown and able to pay the stamina cost.
pub fn try_jump(
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    cfg: &ActorConfig,
) -> JumpOutcome {
    if !state.is_grounded() {
        return JumpOutcome::Airborne;
    }
    if state.jump_cooldown > 0.0 {
        return JumpOutcome::OnCooldown { remaining: state.jump_cooldown };
    }
    let cost = cfg.stamina.jump_cost;
    if state.stamina() < cost {
        return JumpOutcome::NoStamina { stamina: state.stamina(), cost };
    }

    let take_off_speed = derived.jump_force * state.performance_modifier();
    state.vertical_velocity = take_off_speed;
    state.grounded = false;
    state.jump_cooldown = cfg.jump_cooldown;
    state.set_stamina(state.stamina() - cost, derived.max_stamina);
    JumpOutcome::Jumped { take_off_speed }
}

/// Gravity and vertical integration; lands on the ground plane.
pub fn integrate_vertical(state: &mut RuntimeState, cfg: &ActorConfig, dt: f32) {
    let ground = cfg.ground_level;
    if state.grounded && state.position.y <= ground {
        state.position.y = ground;
        state.vertical_velocity = 0.0;
        return;
    }

    state.grounded = false;
    state.vertical_velocity -= cfg.gravity * dt;
    state.position.y += state.vertical_velocity * dt;

    if state.position.y <= ground {
        state.position.y = ground;
        state.vertical_velocity = 0.0;
        state.grounded = true;
    }
}

/// Target ground speed for the intent (signed, performance-scaled).
pub fn target_speed(state: &RuntimeState, derived: &DerivedConstants, axis: f32) -> f32 {
    let perf = state.performance_modifier();
    if axis > 0.0 {
        let top =
            if state.is_sprinting() { derived.sprint_speed } else { derived.max_forward_speed };
        top * perf
    } else if axis < 0.0 {
        -derived.max_backward_speed * perf
    } else {
        0.0
    }
}

/// Accelerate toward the intent's target speed (or brake to a stop), then
/// integrate position on the ground plane.
pub fn integrate_horizontal(
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    intent: &IntentSnapshot,
    dt: f32,
) {
    let axis = intent.move_axis();
    // Sprint only forward and only with breath left
    state.sprinting = intent.sprint && axis > 0.0 && !state.is_exhausted();

    let target = target_speed(state, derived, axis);
    let speeding_up = target.abs() > state.speed.abs() && target * state.speed >= 0.0;
    let mut rate = if axis != 0.0 && speeding_up { derived.acceleration } else { derived.deceleration };
    if !state.is_grounded() {
        rate *= AIR_CONTROL;
    }
    state.speed = move_toward(state.speed, target, rate * dt);

    let facing = state.facing();
    state.position.x += facing.x * state.speed * dt;
    state.position.z += facing.z * state.speed * dt;
    sync_velocity(state);
}

/// Keep the velocity vector consistent with speed, heading and vertical speed.
pub fn sync_velocity(state: &mut RuntimeState) {
    let ground = state.facing() * state.speed;
    state.velocity.x = ground.x;
    state.velocity.y = state.vertical_velocity;
    state.velocity.z = ground.z;
}

/// Clamp the ground position into the play area. Returns true if it moved.
///
/// A clamped actor keeps only the part of its run that slides along the
/// boundary; running straight into it leaves the actor standing.
pub fn clamp_to_bounds(state: &mut RuntimeState, bounds: &PlayBounds) -> bool {
    let x = state.position.x.clamp(bounds.min_x, bounds.max_x);
    let z = state.position.z.clamp(bounds.min_z, bounds.max_z);
    let hit_x = x != state.position.x;
    let hit_z = z != state.position.z;
    if !(hit_x || hit_z) {
        return false;
    }
    state.position.x = x;
    state.position.z = z;

    let facing = state.facing();
    let mut along: f32 = 1.0;
    if hit_x {
        along -= facing.x * facing.x;
    }
    if hit_z {
        along -= facing.z * facing.z;
    }
    state.speed *= along.max(0.0);
    sync_velocity(state);
    true
}
