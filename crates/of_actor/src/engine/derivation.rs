//! Attributes + traits → derived constants.
//!
//! This module is the single authority for turning a skill profile into the
//! kinematic and mechanical constants the tick pipeline reads. Nothing here
//! is random and nothing runs per tick; actors call it at construction and
//! on refresh.

use crate::engine::physics_constants::derivation::*;
use crate::models::attributes::{n100, ActorAttributes};
use crate::models::role::RoleTag;
use crate::models::traits::{TraitSet, TraitTarget};
use serde::{Deserialize, Serialize};

/// Kinematic and mechanical limits of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedConstants {
    /// Top forward speed (m/s) - pace + acceleration
    pub max_forward_speed: f32,
    /// Top backpedal speed (m/s) - pace + agility
    pub max_backward_speed: f32,
    /// Top sprint speed (m/s) - forward speed × stamina share
    pub sprint_speed: f32,
    /// m/s² - acceleration + agility
    pub acceleration: f32,
    /// m/s² - balance + strength + agility
    pub deceleration: f32,
    /// Jump take-off velocity (m/s) - jumping + strength
    pub jump_force: f32,
    /// Seconds between forward dribble touches - technique + passing
    pub kick_interval: f32,
    /// Dribble touch force - passing + strength
    pub kick_force: f32,
    /// Possession radius (m) - first touch + dribbling
    pub control_radius: f32,
    /// 0..1 - dribbling + technique + agility
    pub dribbling_skill: f32,
    /// Stamina pool (points) - stamina + natural fitness
    pub max_stamina: f32,
    /// Recovery while idle (points/s) - natural fitness + stamina
    pub stamina_recovery: f32,
    /// Turn rate (rad/s) - agility + balance
    pub turn_speed: f32,
}

impl DerivedConstants {
    pub fn values(&self) -> [(&'static str, f32); 13] {
        [
            ("max_forward_speed", self.max_forward_speed),
            ("max_backward_speed", self.max_backward_speed),
            ("sprint_speed", self.sprint_speed),
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("jump_force", self.jump_force),
            ("kick_interval", self.kick_interval),
            ("kick_force", self.kick_force),
            ("control_radius", self.control_radius),
            ("dribbling_skill", self.dribbling_skill),
            ("max_stamina", self.max_stamina),
            ("stamina_recovery", self.stamina_recovery),
            ("turn_speed", self.turn_speed),
        ]
    }

    /// All constants finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_finite() && *v > 0.0)
    }
}

impl Default for DerivedConstants {
    fn default() -> Self {
        derive_constants(&ActorAttributes::default(), &TraitSet::default())
    }
}

/// Derive every constant from a profile.
pub fn derive_constants(attrs: &ActorAttributes, traits: &TraitSet) -> DerivedConstants {
    let t = &attrs.technical;
    let p = &attrs.physical;

    let pace = n100(p.pace);
    let acc = n100(p.acceleration);
    let agi = n100(p.agility);
    let bal = n100(p.balance);
    let str_n = n100(p.strength);
    let jmp = n100(p.jumping);
    let sta = n100(p.stamina);
    let nf = n100(p.natural_fitness);
    let tech = n100(t.technique);
    let pas = n100(t.passing);
    let ft = n100(t.first_touch);
    let dri = n100(t.dribbling);

    let m = |target| traits.multiplier(target);

    let max_forward_speed = (FORWARD_SPEED_BASE
        + pace * FORWARD_SPEED_PACE
        + acc * FORWARD_SPEED_ACCELERATION)
        * m(TraitTarget::MaxSpeed);
    let max_backward_speed = (BACKWARD_SPEED_BASE
        + pace * BACKWARD_SPEED_PACE
        + agi * BACKWARD_SPEED_AGILITY)
        * m(TraitTarget::MaxSpeed);
    let sprint_speed = max_forward_speed
        * (SPRINT_MULT_BASE + sta * SPRINT_MULT_STAMINA)
        * m(TraitTarget::SprintSpeed);

    // Deceleration: balance 50% + strength 30% + agility 20%
    let decel_factor =
        DECEL_BALANCE_WEIGHT * bal + DECEL_STRENGTH_WEIGHT * str_n + DECEL_AGILITY_WEIGHT * agi;

    let dribbling_skill = ((DRIBBLING_SKILL_DRIBBLING * dri
        + DRIBBLING_SKILL_TECHNIQUE * tech
        + DRIBBLING_SKILL_AGILITY * agi)
        * m(TraitTarget::DribblingSkill))
    .min(1.0);

    DerivedConstants {
        max_forward_speed,
        max_backward_speed,
        sprint_speed,
        acceleration: (ACCEL_BASE + acc * ACCEL_ACCELERATION + agi * ACCEL_AGILITY)
            * m(TraitTarget::Acceleration),
        deceleration: DECEL_BASE + decel_factor * DECEL_RANGE,
        jump_force: (JUMP_BASE + jmp * JUMP_JUMPING + str_n * JUMP_STRENGTH)
            * m(TraitTarget::JumpForce),
        kick_interval: KICK_INTERVAL_BASE
            + tech * KICK_INTERVAL_TECHNIQUE
            + pas * KICK_INTERVAL_PASSING,
        kick_force: (KICK_FORCE_BASE + pas * KICK_FORCE_PASSING + str_n * KICK_FORCE_STRENGTH)
            * m(TraitTarget::KickForce),
        control_radius: (CONTROL_RADIUS_BASE
            + ft * CONTROL_RADIUS_FIRST_TOUCH
            + dri * CONTROL_RADIUS_DRIBBLING)
            * m(TraitTarget::ControlRadius),
        dribbling_skill,
        max_stamina: (MAX_STAMINA_BASE
            + sta * MAX_STAMINA_STAMINA
            + nf * MAX_STAMINA_NATURAL_FITNESS)
            * m(TraitTarget::MaxStamina),
        stamina_recovery: (RECOVERY_BASE + nf * RECOVERY_NATURAL_FITNESS + sta * RECOVERY_STAMINA)
            * m(TraitTarget::StaminaRecovery),
        turn_speed: TURN_SPEED_BASE + agi * TURN_SPEED_AGILITY + bal * TURN_SPEED_BALANCE,
    }
}

/// Category-weighted overall rating (technical 40%, physical 35%, mental 25%).
pub fn overall_rating(attrs: &ActorAttributes) -> u8 {
    let (tech, mental, phys) = attrs.category_averages();
    let overall = OVERALL_TECHNICAL_WEIGHT * tech
        + OVERALL_PHYSICAL_WEIGHT * phys
        + OVERALL_MENTAL_WEIGHT * mental;
    overall.round().clamp(0.0, 100.0) as u8
}

/// Rating for one role archetype, from its curated skill weights.
pub fn positional_rating(attrs: &ActorAttributes, role: RoleTag) -> u8 {
    role.weighted_average(attrs).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attributes::{Mental, Physical, Technical};
    use proptest::prelude::*;

    fn none() -> TraitSet {
        TraitSet::default()
    }

    #[test]
    fn test_default_profile_is_valid() {
        let d = DerivedConstants::default();
        assert!(d.is_valid(), "{:?}", d);
        assert!(d.sprint_speed > d.max_forward_speed);
        assert!(d.max_forward_speed > d.max_backward_speed);
    }

    #[test]
    fn test_extreme_profiles_are_valid() {
        for rating in [1, 100] {
            let d = derive_constants(&ActorAttributes::uniform(rating), &none());
            assert!(d.is_valid(), "rating {rating}: {:?}", d);
            assert!(d.dribbling_skill <= 1.0);
        }
    }

    #[test]
    fn test_fast_actor_outpaces_slow_actor() {
        let mut fast = ActorAttributes::uniform(50);
        fast.physical.pace = 90;
        fast.physical.acceleration = 90;
        let mut slow = ActorAttributes::uniform(50);
        slow.physical.pace = 10;
        slow.physical.acceleration = 10;

        let fast = derive_constants(&fast, &none());
        let slow = derive_constants(&slow, &none());
        assert!(fast.max_forward_speed > slow.max_forward_speed);
        assert!(fast.acceleration > slow.acceleration);
    }

    #[test]
    fn test_trait_multipliers_apply_after_base() {
        let attrs = ActorAttributes::uniform(60);
        let base = derive_constants(&attrs, &none());
        let speedster = derive_constants(&attrs, &TraitSet::new(["speedster"], Vec::<&str>::new()));
        let lazy = derive_constants(&attrs, &TraitSet::new(Vec::<&str>::new(), ["lazy"]));

        assert!((speedster.max_forward_speed - base.max_forward_speed * 1.2).abs() < 1e-4);
        assert!((lazy.max_forward_speed - base.max_forward_speed * 0.8).abs() < 1e-4);
        assert!((lazy.stamina_recovery - base.stamina_recovery * 0.8).abs() < 1e-4);
        // Untouched by either trait
        assert_eq!(speedster.jump_force, base.jump_force);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let attrs = ActorAttributes::uniform(73);
        let traits = TraitSet::new(["magnet", "engine"], ["nervous"]);
        assert_eq!(derive_constants(&attrs, &traits), derive_constants(&attrs, &traits));
    }

    #[test]
    fn test_overall_rating_golden_values() {
        assert_eq!(overall_rating(&ActorAttributes::uniform(50)), 50);

        let attrs = ActorAttributes {
            technical: Technical::uniform(80),
            mental: Mental::uniform(40),
            physical: Physical::uniform(60),
        };
        // 0.40*80 + 0.35*60 + 0.25*40 = 32 + 21 + 10 = 63
        assert_eq!(overall_rating(&attrs), 63);
    }

    #[test]
    fn test_positional_rating_prefers_matching_profile() {
        let mut striker = ActorAttributes::uniform(40);
        striker.technical.finishing = 95;
        striker.mental.off_the_ball = 90;
        striker.mental.composure = 85;

        let fw = positional_rating(&striker, RoleTag::Attacker);
        let gk = positional_rating(&striker, RoleTag::Goalkeeper);
        assert!(fw > gk, "fw={fw} gk={gk}");
        assert_eq!(positional_rating(&ActorAttributes::uniform(70), RoleTag::Defender), 70);
    }

    fn arb_attributes() -> impl Strategy<Value = ActorAttributes> {
        (
            prop::collection::vec(1u8..=100, Technical::NAMES.len()),
            prop::collection::vec(1u8..=100, Mental::NAMES.len()),
            prop::collection::vec(1u8..=100, Physical::NAMES.len()),
        )
            .prop_map(|(t, m, p)| {
                let mut attrs = ActorAttributes::default();
                for (name, v) in Technical::NAMES.iter().zip(t) {
                    attrs.technical.set(name, v as f32);
                }
                for (name, v) in Mental::NAMES.iter().zip(m) {
                    attrs.mental.set(name, v as f32);
                }
                for (name, v) in Physical::NAMES.iter().zip(p) {
                    attrs.physical.set(name, v as f32);
                }
                attrs
            })
    }

    fn all_names() -> Vec<&'static str> {
        Technical::NAMES
            .iter()
            .chain(Mental::NAMES)
            .chain(Physical::NAMES)
            .copied()
            .collect()
    }

    proptest! {
        #[test]
        fn prop_constants_finite_and_positive(attrs in arb_attributes()) {
            let d = derive_constants(&attrs, &none());
            prop_assert!(d.is_valid(), "{:?}", d);
        }

        #[test]
        fn prop_constants_non_decreasing_in_any_rating(
            attrs in arb_attributes(),
            idx in 0usize..36,
            bump in 1u8..=99,
        ) {
            let names = all_names();
            let name = names[idx % names.len()];
            let before = attrs.get(name).unwrap_or(1);
            let mut raised = attrs;
            raised.set(name, before.saturating_add(bump) as f32).unwrap();

            let traits = TraitSet::new(["speedster", "magnet"], ["unfit"]);
            let lo = derive_constants(&attrs, &traits);
            let hi = derive_constants(&raised, &traits);
            for ((key, a), (_, b)) in lo.values().iter().zip(hi.values().iter()) {
                prop_assert!(b >= a, "{} decreased when raising {}: {} -> {}", key, name, a, b);
            }
        }

        #[test]
        fn prop_overall_rating_matches_formula(attrs in arb_attributes()) {
            let (t, m, p) = attrs.category_averages();
            let expected = (0.40 * t + 0.35 * p + 0.25 * m).round() as u8;
            prop_assert_eq!(overall_rating(&attrs), expected);
        }
    }
}
