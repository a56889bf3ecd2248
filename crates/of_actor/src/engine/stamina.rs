//! Stamina, performance modifier and pressure.
//!
//! The performance modifier is the only channel fatigue takes into the rest
//! of the core: speed, force and accuracy all multiply by it.

use crate::engine::config::StaminaConfig;
use crate::engine::derivation::DerivedConstants;
use crate::engine::runtime_state::{RuntimeState, PERFORMANCE_MAX, PERFORMANCE_MIN};
use crate::models::attributes::n100;

/// `stamina / max_stamina`, in `0..=1`.
pub fn stamina_ratio(state: &RuntimeState, derived: &DerivedConstants) -> f32 {
    if derived.max_stamina > 0.0 {
        (state.stamina() / derived.max_stamina).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `0.5 + 0.5 × ratio`.
pub fn performance_from_ratio(ratio: f32) -> f32 {
    (PERFORMANCE_MIN + (PERFORMANCE_MAX - PERFORMANCE_MIN) * ratio.clamp(0.0, 1.0))
        .clamp(PERFORMANCE_MIN, PERFORMANCE_MAX)
}

/// Drain while moving, recover while idle, then refresh the status flags.
pub fn update_stamina(
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    work_rate: u8,
    cfg: &StaminaConfig,
    dt: f32,
) {
    if state.speed().abs() > cfg.moving_speed_threshold {
        let mut rate = cfg.base_drain_rate;
        if state.is_sprinting() {
            rate *= cfg.sprint_drain_mult;
        }
        if state.is_dribbling() {
            rate *= cfg.dribble_drain_mult;
        }
        if !state.is_grounded() {
            rate *= cfg.airborne_drain_mult;
        }
        // Higher work rate drains slower
        rate *= (cfg.work_rate_drain_base - n100(work_rate)).max(0.0);
        state.set_stamina(state.stamina() - rate * dt, derived.max_stamina);
    } else {
        state.set_stamina(state.stamina() + derived.stamina_recovery * dt, derived.max_stamina);
    }

    refresh_status(state, derived, cfg);
}

/// Recompute `exhausted` and the performance modifier from current stamina.
pub fn refresh_status(state: &mut RuntimeState, derived: &DerivedConstants, cfg: &StaminaConfig) {
    let ratio = stamina_ratio(state, derived);
    let was_exhausted = state.exhausted;
    state.exhausted = ratio < cfg.exhausted_ratio;
    if state.exhausted != was_exhausted {
        log::debug!("Exhausted: {} (stamina ratio {:.2})", state.exhausted, ratio);
    }
    state.set_performance_modifier(performance_from_ratio(ratio));
}

/// Pressure rises while dribbling near top speed, decays otherwise.
pub fn update_pressure(
    state: &mut RuntimeState,
    derived: &DerivedConstants,
    cfg: &StaminaConfig,
    dt: f32,
) {
    let fast = state.speed() > cfg.pressure_speed_ratio * derived.max_forward_speed;
    let delta = if state.is_dribbling() && fast {
        cfg.pressure_rise_rate * dt
    } else {
        -cfg.pressure_decay_rate * dt
    };
    state.set_pressure(state.pressure() + delta);
}
