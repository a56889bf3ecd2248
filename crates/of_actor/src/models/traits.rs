//! Positive/negative trait sets and their multiplicative effects.
//!
//! Traits are plain string ids so profiles authored elsewhere can carry ids
//! this core does not know; those are kept but ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a trait multiplier acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraitTarget {
    // Derived constants
    MaxSpeed,
    SprintSpeed,
    Acceleration,
    JumpForce,
    KickForce,
    ControlRadius,
    DribblingSkill,
    MaxStamina,
    StaminaRecovery,
    // Error baselines
    MissKickChance,
    TripChance,
    BadTouchChance,
    LoseControlChance,
    // Sensitivity of error chances to pressure
    PressureSensitivity,
}

/// Effects of a known trait id. Unknown ids return an empty slice.
pub fn trait_effects(id: &str) -> &'static [(TraitTarget, f32)] {
    use TraitTarget::*;
    match id {
        // Positive
        "speedster" => &[(MaxSpeed, 1.2), (SprintSpeed, 1.2)],
        "engine" => &[(MaxStamina, 1.15), (StaminaRecovery, 1.2)],
        "magnet" => &[(ControlRadius, 1.15), (BadTouchChance, 0.7)],
        "technician" => &[(DribblingSkill, 1.15), (LoseControlChance, 0.7)],
        "sniper" => &[(MissKickChance, 0.7)],
        "acrobat" => &[(JumpForce, 1.15), (TripChance, 0.8)],
        "cannon" => &[(KickForce, 1.15)],
        "composed" => &[(PressureSensitivity, 0.6)],
        // Negative
        "lazy" => &[(MaxSpeed, 0.8), (StaminaRecovery, 0.8)],
        "clumsy" => &[(TripChance, 1.5), (BadTouchChance, 1.3)],
        "heavy_touch" => &[(ControlRadius, 0.85), (BadTouchChance, 1.4)],
        "unfit" => &[(MaxStamina, 0.85), (StaminaRecovery, 0.85)],
        "nervous" => &[(MissKickChance, 1.3), (PressureSensitivity, 1.5)],
        "wasteful" => &[(MissKickChance, 1.4)],
        _ => &[],
    }
}

/// Trait ids of one actor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraitSet {
    positive: BTreeSet<String>,
    negative: BTreeSet<String>,
}

impl TraitSet {
    /// Build a set from raw ids. Ids are lowercased and trimmed; an id listed
    /// in both groups cancels out and is dropped from both.
    pub fn new<P, N, S>(positive: P, negative: N) -> Self
    where
        P: IntoIterator<Item = S>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { positive: normalize_ids(positive), negative: normalize_ids(negative) }.reconciled()
    }

    pub fn positive(&self) -> &BTreeSet<String> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<String> {
        &self.negative
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = id.trim().to_lowercase();
        self.positive.contains(&id) || self.negative.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Product of every multiplier that targets `target`.
    pub fn multiplier(&self, target: TraitTarget) -> f32 {
        self.positive
            .iter()
            .chain(self.negative.iter())
            .flat_map(|id| trait_effects(id).iter())
            .filter(|(t, _)| *t == target)
            .map(|(_, m)| *m)
            .product()
    }

    /// Re-normalize after deserialization.
    pub fn reconciled(mut self) -> Self {
        self.positive = normalize_ids(std::mem::take(&mut self.positive));
        self.negative = normalize_ids(std::mem::take(&mut self.negative));

        let both: Vec<String> = self.positive.intersection(&self.negative).cloned().collect();
        for id in both {
            log::warn!("Trait '{}' listed as both positive and negative; ignoring it", id);
            self.positive.remove(&id);
            self.negative.remove(&id);
        }

        for id in self.positive.iter().chain(self.negative.iter()) {
            if trait_effects(id).is_empty() {
                log::debug!("Trait '{}' has no effect on the actor core", id);
            }
        }
        self
    }
}

fn normalize_ids<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|id| id.as_ref().trim().to_lowercase())
        .filter(|id| !id.is_empty())
        .collect()
}
