//! Procedural pose blending.
//!
//! Purely cosmetic: nothing here feeds back into gameplay. The pose is a
//! function of speed ratio, grounded flag and sprint flag plus a gait phase,
//! eased toward each tick so renderers never see a snap.

use crate::engine::physics_constants::pose::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Limb angles (rad), torso tilt (rad, forward positive) and vertical bounce (m).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_arm: f32,
    pub right_arm: f32,
    pub torso_tilt: f32,
    pub bounce: f32,
}

impl Pose {
    fn lerp(&self, to: &Pose, t: f32) -> Pose {
        let l = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            left_leg: l(self.left_leg, to.left_leg),
            right_leg: l(self.right_leg, to.right_leg),
            left_arm: l(self.left_arm, to.left_arm),
            right_arm: l(self.right_arm, to.right_arm),
            torso_tilt: l(self.torso_tilt, to.torso_tilt),
            bounce: l(self.bounce, to.bounce),
        }
    }
}

/// Pose state carried across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseBlender {
    pub pose: Pose,
    /// Gait phase in `0..TAU`.
    pub phase: f32,
}

impl PoseBlender {
    /// Advance the gait and ease the pose toward this tick's target.
    ///
    /// `speed_ratio` is signed `speed / max_forward_speed`.
    pub fn blend(&mut self, speed_ratio: f32, grounded: bool, sprinting: bool, dt: f32) -> Pose {
        let ratio = if speed_ratio.is_finite() { speed_ratio.clamp(-1.0, 2.0) } else { 0.0 };
        let target = target_pose(ratio, self.phase, grounded, sprinting);

        let stride = if sprinting { STRIDE_FREQUENCY_HZ * SPRINT_STRIDE_MULT } else { STRIDE_FREQUENCY_HZ };
        if grounded {
            self.phase = (self.phase + TAU * stride * ratio.abs() * dt).rem_euclid(TAU);
        }

        let t = (BLEND_RATE * dt).clamp(0.0, 1.0);
        self.pose = self.pose.lerp(&target, t);
        self.pose
    }
}

/// Pose the body would hold at this phase with no easing.
pub fn target_pose(speed_ratio: f32, phase: f32, grounded: bool, sprinting: bool) -> Pose {
    if !grounded {
        return Pose {
            left_leg: AIRBORNE_TUCK_RAD,
            right_leg: AIRBORNE_TUCK_RAD,
            left_arm: -ARM_SWING_MAX_RAD * 0.5,
            right_arm: -ARM_SWING_MAX_RAD * 0.5,
            torso_tilt: 0.0,
            bounce: 0.0,
        };
    }

    let amount = speed_ratio.abs().min(1.0);
    let swing = phase.sin();
    let leg = LEG_SWING_MAX_RAD * amount * swing;
    let arm = ARM_SWING_MAX_RAD * amount * swing;
    let mut tilt = TORSO_TILT_MAX_RAD * speed_ratio.clamp(-1.0, 1.0);
    if sprinting {
        tilt += SPRINT_TILT_EXTRA_RAD;
    }

    Pose {
        left_leg: leg,
        right_leg: -leg,
        // Arms swing opposite to the legs
        left_arm: -arm,
        right_arm: arm,
        torso_tilt: tilt,
        bounce: BOUNCE_MAX_M * amount * (2.0 * phase).sin().abs(),
    }
}

/// Appearance collaborator that receives the blended pose.
pub trait PoseSink {
    fn apply_pose(&mut self, pose: &Pose);
}

/// Headless sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPoseSink;

impl PoseSink for NullPoseSink {
    fn apply_pose(&mut self, _pose: &Pose) {}
}
