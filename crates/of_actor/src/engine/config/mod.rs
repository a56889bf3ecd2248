//! # Actor Configuration
//!
//! Runtime tunables for one actor: world, possession, stamina and shots.
//! Derivation coefficients are not here; they live in `physics_constants`.
//!
//! ## Usage
//! ```rust
//! use of_actor::engine::config::ActorConfig;
//!
//! let config = ActorConfig::default();
//! let arcade = ActorConfig::arcade();
//! assert!(arcade.validate().is_ok());
//! ```

mod shot_config;
mod stamina_config;

pub use shot_config::ShotConfig;
pub use stamina_config::StaminaConfig;

use crate::engine::physics_constants::{field, world};
use crate::error::{ActorError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rectangular play area on the ground plane (x/z, meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for PlayBounds {
    fn default() -> Self {
        Self {
            min_x: -field::HALF_LENGTH_M,
            max_x: field::HALF_LENGTH_M,
            min_z: -field::HALF_WIDTH_M,
            max_z: field::HALF_WIDTH_M,
        }
    }
}

impl PlayBounds {
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActorConfig {
    /// Play boundary the actor is clamped to
    pub bounds: PlayBounds,
    /// Gravity (m/s²) (default: 9.81)
    pub gravity: f32,
    /// Ground height (m) (default: 0.0)
    pub ground_level: f32,
    /// Largest Δt a single tick integrates (s) (default: 0.1)
    pub max_tick_dt: f32,
    /// Possession is lost beyond `control_radius × ratio` (default: 1.2)
    pub release_radius_ratio: f32,
    /// No first touch is attempted for this long after a bad touch or a shot (s) (default: 0.5)
    pub bad_touch_recovery: f32,
    /// Time between jumps (s) (default: 0.8)
    pub jump_cooldown: f32,
    pub stamina: StaminaConfig,
    pub shot: ShotConfig,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            bounds: PlayBounds::default(),
            gravity: world::GRAVITY,
            ground_level: world::GROUND_LEVEL,
            max_tick_dt: world::MAX_TICK_DT,
            release_radius_ratio: 1.2,
            bad_touch_recovery: 0.5,
            jump_cooldown: 0.8,
            stamina: StaminaConfig::default(),
            shot: ShotConfig::default(),
        }
    }
}

impl ActorConfig {
    /// Default tuning.
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Forgiving: slower drain, wider sweet spot, tighter shots.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.stamina.base_drain_rate = 1.0;
        cfg.shot.sweet_spot_min = 0.5;
        cfg.shot.sweet_spot_max = 0.85;
        cfg.shot.max_spread_rad = 0.2;
        cfg.jump_cooldown = 0.6;
        cfg
    }

    /// Demanding: faster drain, narrow sweet spot, wide spread.
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.stamina.base_drain_rate = 2.0;
        cfg.shot.sweet_spot_min = 0.65;
        cfg.shot.sweet_spot_max = 0.78;
        cfg.shot.max_spread_rad = 0.45;
        cfg
    }

    /// For tests: no shot spread.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.shot.max_spread_rad = 0.0;
        cfg
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: ActorConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: ActorConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let cfg = if is_yaml { Self::from_yaml_str(&text)? } else { Self::from_json_str(&text)? };
        log::info!("Loaded actor config from {:?}", path);
        Ok(cfg)
    }

    /// JSON schema of the config file format.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(ActorConfig);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }

    pub fn validate(&self) -> Result<()> {
        let b = &self.bounds;
        let finite = [b.min_x, b.max_x, b.min_z, b.max_z].iter().all(|v| v.is_finite());
        if !finite || b.min_x >= b.max_x || b.min_z >= b.max_z {
            return Err(ActorError::invalid_config("bounds", format!("{:?}", b)));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(ActorError::invalid_config("gravity", "must be > 0"));
        }
        if !self.ground_level.is_finite() {
            return Err(ActorError::invalid_config("ground_level", "must be finite"));
        }
        if !(self.max_tick_dt.is_finite() && self.max_tick_dt > 0.0) {
            return Err(ActorError::invalid_config("max_tick_dt", "must be > 0"));
        }
        if !(self.release_radius_ratio.is_finite() && self.release_radius_ratio >= 1.0) {
            return Err(ActorError::invalid_config("release_radius_ratio", "must be >= 1.0"));
        }
        for (field, value) in [
            ("bad_touch_recovery", self.bad_touch_recovery),
            ("jump_cooldown", self.jump_cooldown),
            ("stamina.moving_speed_threshold", self.stamina.moving_speed_threshold),
            ("stamina.base_drain_rate", self.stamina.base_drain_rate),
            ("stamina.sprint_drain_mult", self.stamina.sprint_drain_mult),
            ("stamina.dribble_drain_mult", self.stamina.dribble_drain_mult),
            ("stamina.airborne_drain_mult", self.stamina.airborne_drain_mult),
            ("stamina.jump_cost", self.stamina.jump_cost),
            ("stamina.pressure_rise_rate", self.stamina.pressure_rise_rate),
            ("stamina.pressure_decay_rate", self.stamina.pressure_decay_rate),
            ("shot.accuracy_falloff", self.shot.accuracy_falloff),
            ("shot.max_spread_rad", self.shot.max_spread_rad),
            ("shot.stamina_per_power", self.shot.stamina_per_power),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ActorError::invalid_config(field, "must be finite and >= 0"));
            }
        }
        // work_rate/100 tops out at 1.0; keep the drain factor positive
        if !(self.stamina.work_rate_drain_base.is_finite() && self.stamina.work_rate_drain_base > 1.0)
        {
            return Err(ActorError::invalid_config("stamina.work_rate_drain_base", "must be > 1.0"));
        }
        let ratio = self.stamina.exhausted_ratio;
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(ActorError::invalid_config("stamina.exhausted_ratio", "must be in (0, 1)"));
        }
        let (lo, hi) = (self.shot.sweet_spot_min, self.shot.sweet_spot_max);
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(ActorError::invalid_config(
                "shot.sweet_spot",
                format!("band {}..{} must lie in 0..1", lo, hi),
            ));
        }
        if !(0.0..=1.0).contains(&self.shot.accuracy_min) {
            return Err(ActorError::invalid_config("shot.accuracy_min", "must be in 0..1"));
        }
        Ok(())
    }
}

// ========== Tests ==========
