//! Charged-shot tuning.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ShotConfig {
    /// Lower edge of the sweet-spot charge band (default: 0.6)
    pub sweet_spot_min: f32,
    /// Upper edge of the sweet-spot charge band (default: 0.8)
    pub sweet_spot_max: f32,
    /// Accuracy lost per unit of charge outside the band (default: 1.5)
    pub accuracy_falloff: f32,
    /// Accuracy never drops below this (default: 0.2)
    pub accuracy_min: f32,
    /// Directional spread at zero accuracy (rad) (default: 0.35)
    pub max_spread_rad: f32,
    /// Stamina points per unit of shot power (default: 0.15)
    pub stamina_per_power: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            sweet_spot_min: 0.6,
            sweet_spot_max: 0.8,
            accuracy_falloff: 1.5,
            accuracy_min: 0.2,
            max_spread_rad: 0.35,
            stamina_per_power: 0.15,
        }
    }
}

impl ShotConfig {
    pub fn sweet_spot_mid(&self) -> f32 {
        (self.sweet_spot_min + self.sweet_spot_max) * 0.5
    }
}
