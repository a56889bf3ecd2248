//! Physics and tuning constants for the actor core.
//!
//! Grouped per derived value / subsystem. The coefficients are the tuning:
//! change them here, never inline.

/// Field dimensions (meters)
pub mod field {
    /// Field length in meters (x axis)
    pub const LENGTH_M: f32 = 105.0;
    /// Field width in meters (z axis)
    pub const WIDTH_M: f32 = 68.0;
    pub const HALF_LENGTH_M: f32 = LENGTH_M * 0.5;
    pub const HALF_WIDTH_M: f32 = WIDTH_M * 0.5;
}

/// Gravity and ground
pub mod world {
    /// Gravity constant (m/s²)
    pub const GRAVITY: f32 = 9.81;
    /// Height of the pitch surface (m)
    pub const GROUND_LEVEL: f32 = 0.0;
    /// Longest tick the integrator accepts (s); larger Δt is capped
    pub const MAX_TICK_DT: f32 = 0.1;
}

pub mod derivation {
    //! # Ratings → derived constants
    //!
    //! Every value is `BASE + Σ rating/100 × COEFFICIENT`, then trait
    //! multipliers. All coefficients are non-negative, so each derived
    //! constant is non-decreasing in the ratings that feed it.

    // ============================================================
    // Forward top speed (pace + acceleration → m/s), 4.05 ~ 9.0
    // ============================================================
    pub const FORWARD_SPEED_BASE: f32 = 4.0;
    pub const FORWARD_SPEED_PACE: f32 = 4.0;
    pub const FORWARD_SPEED_ACCELERATION: f32 = 1.0;

    // ============================================================
    // Backward top speed (pace + agility → m/s), 1.52 ~ 3.5
    // ============================================================
    pub const BACKWARD_SPEED_BASE: f32 = 1.5;
    pub const BACKWARD_SPEED_PACE: f32 = 1.0;
    pub const BACKWARD_SPEED_AGILITY: f32 = 1.0;

    // ============================================================
    // Sprint speed = forward top speed × (base + stamina share)
    // ============================================================
    pub const SPRINT_MULT_BASE: f32 = 1.3;
    pub const SPRINT_MULT_STAMINA: f32 = 0.2;

    // ============================================================
    // Acceleration (acceleration + agility → m/s²)
    // ============================================================
    pub const ACCEL_BASE: f32 = 2.5;
    pub const ACCEL_ACCELERATION: f32 = 4.0;
    pub const ACCEL_AGILITY: f32 = 1.5;

    // ============================================================
    // Deceleration (balance + strength + agility → m/s²)
    // ============================================================
    pub const DECEL_BASE: f32 = 3.0;
    pub const DECEL_RANGE: f32 = 4.0;
    pub const DECEL_BALANCE_WEIGHT: f32 = 0.5;
    pub const DECEL_STRENGTH_WEIGHT: f32 = 0.3;
    pub const DECEL_AGILITY_WEIGHT: f32 = 0.2;

    // ============================================================
    // Jump take-off velocity (jumping + strength → m/s)
    // ============================================================
    pub const JUMP_BASE: f32 = 3.0;
    pub const JUMP_JUMPING: f32 = 2.5;
    pub const JUMP_STRENGTH: f32 = 0.5;

    // ============================================================
    // Dribble touch cadence (technique + passing → seconds)
    // Cleaner technique keeps the ball closer, so touches can be spaced out.
    // ============================================================
    pub const KICK_INTERVAL_BASE: f32 = 0.30;
    pub const KICK_INTERVAL_TECHNIQUE: f32 = 0.15;
    pub const KICK_INTERVAL_PASSING: f32 = 0.05;

    // ============================================================
    // Dribble touch force (passing + strength)
    // ============================================================
    pub const KICK_FORCE_BASE: f32 = 3.0;
    pub const KICK_FORCE_PASSING: f32 = 2.0;
    pub const KICK_FORCE_STRENGTH: f32 = 1.5;

    // ============================================================
    // Control radius (first touch + dribbling → m)
    // ============================================================
    pub const CONTROL_RADIUS_BASE: f32 = 0.8;
    pub const CONTROL_RADIUS_FIRST_TOUCH: f32 = 0.4;
    pub const CONTROL_RADIUS_DRIBBLING: f32 = 0.3;

    // ============================================================
    // Dribbling skill coefficient (0..1)
    // ============================================================
    pub const DRIBBLING_SKILL_DRIBBLING: f32 = 0.6;
    pub const DRIBBLING_SKILL_TECHNIQUE: f32 = 0.25;
    pub const DRIBBLING_SKILL_AGILITY: f32 = 0.15;

    // ============================================================
    // Stamina pool (stamina + natural fitness → points)
    // ============================================================
    pub const MAX_STAMINA_BASE: f32 = 70.0;
    pub const MAX_STAMINA_STAMINA: f32 = 20.0;
    pub const MAX_STAMINA_NATURAL_FITNESS: f32 = 10.0;

    // ============================================================
    // Stamina recovery (natural fitness + stamina → points/s)
    // ============================================================
    pub const RECOVERY_BASE: f32 = 4.0;
    pub const RECOVERY_NATURAL_FITNESS: f32 = 4.0;
    pub const RECOVERY_STAMINA: f32 = 2.0;

    // ============================================================
    // Turn rate (agility + balance → rad/s)
    // ============================================================
    pub const TURN_SPEED_BASE: f32 = 2.5;
    pub const TURN_SPEED_AGILITY: f32 = 2.0;
    pub const TURN_SPEED_BALANCE: f32 = 1.0;

    // ============================================================
    // Overall rating category weights
    // ============================================================
    pub const OVERALL_TECHNICAL_WEIGHT: f32 = 0.40;
    pub const OVERALL_PHYSICAL_WEIGHT: f32 = 0.35;
    pub const OVERALL_MENTAL_WEIGHT: f32 = 0.25;
}

pub mod error_model {
    //! # Execution error chances
    //!
    //! `chance = BASE − SLOPE × skill_average`, then traits, then the floor.

    /// No chance ever reaches zero, even at maximum skill.
    pub const ERROR_FLOOR: f32 = 0.01;

    pub const MISS_KICK_BASE: f32 = 0.30;
    pub const MISS_KICK_SLOPE: f32 = 0.28;

    pub const TRIP_BASE: f32 = 0.12;
    pub const TRIP_SLOPE: f32 = 0.11;

    pub const BAD_TOUCH_BASE: f32 = 0.30;
    pub const BAD_TOUCH_SLOPE: f32 = 0.28;

    pub const LOSE_CONTROL_BASE: f32 = 0.25;
    pub const LOSE_CONTROL_SLOPE: f32 = 0.23;

    /// Pressure raises miss-kick / bad-touch / lose-control chances by up to
    /// this share, damped by composure.
    pub const PRESSURE_WEIGHT: f32 = 0.6;
    /// Fatigue raises trip / lose-control chances by up to this share.
    pub const FATIGUE_WEIGHT: f32 = 0.5;

    // Miss-kick: rotate up to ~27°, push force up to +60%
    pub const MISS_KICK_MAX_ANGLE_RAD: f32 = 0.47;
    pub const MISS_KICK_FORCE_MIN_MULT: f32 = 1.0;
    pub const MISS_KICK_FORCE_MAX_MULT: f32 = 1.6;

    // Trip: only above this share of top speed
    pub const TRIP_SPEED_RATIO: f32 = 0.8;
    pub const TRIP_FORCE_MULT: f32 = 2.5;
    pub const TRIP_STAMINA_COST: f32 = 4.0;

    // Bad touch: uncontrolled rebound
    pub const BAD_TOUCH_FORCE_MIN: f32 = 2.5;
    pub const BAD_TOUCH_FORCE_MAX: f32 = 4.5;
    pub const BAD_TOUCH_MAX_DEFLECTION_RAD: f32 = 0.8;

    // Lose control: over-hit dribble touch while sprinting
    pub const LOSE_CONTROL_SPEED_RATIO: f32 = 0.8;
    pub const LOSE_CONTROL_FORCE_MULT: f32 = 1.8;

    // Confidence feedback (failures cost more than successes earn)
    pub const CONFIDENCE_GAIN: f32 = 0.005;
    pub const CONFIDENCE_LOSS: f32 = 0.03;
}

pub mod ball_control {
    /// Below this |speed| (m/s) the actor is not considered to carry the ball.
    pub const DRIBBLE_MIN_SPEED: f32 = 0.2;
    /// Backward nudges fire at this multiple of the forward cadence.
    pub const BACKWARD_INTERVAL_MULT: f32 = 1.5;
    /// Backward nudge force as a share of the derived kick force.
    pub const BACKWARD_FORCE_RATIO: f32 = 0.3;

    // Touch force = kick_force × (PASSING_BASE + PASSING_SHARE × passing) × speed ratio
    //   × (1 + LOOSE_TOUCH_EXTRA × (1 − dribbling_skill))
    pub const TOUCH_PASSING_BASE: f32 = 0.5;
    pub const TOUCH_PASSING_SHARE: f32 = 0.5;
    pub const TOUCH_SPEED_RATIO_MIN: f32 = 0.25;
    pub const TOUCH_SPEED_RATIO_MAX: f32 = 1.5;
    pub const SPRINT_TOUCH_MULT: f32 = 1.3;
    pub const AIRBORNE_TOUCH_MULT: f32 = 0.5;
    /// Extra touch force at zero dribbling skill; a perfect dribbler adds none.
    pub const LOOSE_TOUCH_EXTRA: f32 = 0.4;
}

pub mod shot {
    // Power = (BASE + RANGE × charge) × skill blend × modifiers
    pub const POWER_BASE: f32 = 6.0;
    pub const POWER_RANGE: f32 = 24.0;
    pub const SKILL_FLOOR: f32 = 0.6;
    pub const SKILL_SHARE: f32 = 0.4;

    pub const FINISHING_WEIGHT: f32 = 0.35;
    pub const LONG_SHOTS_WEIGHT: f32 = 0.25;
    pub const TECHNIQUE_WEIGHT: f32 = 0.20;
    pub const STRENGTH_WEIGHT: f32 = 0.20;

    pub const CONFIDENCE_POWER_BASE: f32 = 0.9;
    pub const CONFIDENCE_POWER_SHARE: f32 = 0.2;
    pub const SPRINT_POWER_MULT: f32 = 1.1;
    pub const AIRBORNE_POWER_MULT: f32 = 0.7;

    // Accuracy skill blend for spread
    pub const ACCURACY_FINISHING_WEIGHT: f32 = 0.5;
    pub const ACCURACY_TECHNIQUE_WEIGHT: f32 = 0.3;
    pub const ACCURACY_COMPOSURE_WEIGHT: f32 = 0.2;
    pub const ACCURACY_CONFIDENCE_BASE: f32 = 0.7;
    pub const ACCURACY_CONFIDENCE_SHARE: f32 = 0.3;

    /// Vertical lift added to the shot direction: base + charge share.
    pub const LOFT_BASE: f32 = 0.05;
    pub const LOFT_CHARGE: f32 = 0.2;
}

pub mod kinematics {
    /// Share of acceleration available while airborne.
    pub const AIR_CONTROL: f32 = 0.35;
    /// Turn rate multiplier while sprinting.
    pub const SPRINT_TURN_MULT: f32 = 0.7;
}

pub mod pose {
    /// Gait cycles per second at full speed.
    pub const STRIDE_FREQUENCY_HZ: f32 = 2.2;
    pub const SPRINT_STRIDE_MULT: f32 = 1.25;
    pub const LEG_SWING_MAX_RAD: f32 = 0.9;
    pub const ARM_SWING_MAX_RAD: f32 = 0.7;
    pub const TORSO_TILT_MAX_RAD: f32 = 0.25;
    pub const SPRINT_TILT_EXTRA_RAD: f32 = 0.12;
    pub const BOUNCE_MAX_M: f32 = 0.06;
    /// Knee tuck while airborne (rad).
    pub const AIRBORNE_TUCK_RAD: f32 = 0.5;
    /// Blend rate toward the target pose (1/s).
    pub const BLEND_RATE: f32 = 10.0;
}
