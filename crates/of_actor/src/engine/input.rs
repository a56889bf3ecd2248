//! Intent snapshots and the Input Provider collaborator.
//!
//! Raw device events never reach the core. A provider hands over one
//! debounced [`TickInput`] per tick; an outside decision process builds the
//! same struct and queues it on the actor instead.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentSnapshot {
    pub move_forward: bool,
    pub move_backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub sprint: bool,
    pub jump: bool,
}

impl IntentSnapshot {
    /// +1 forward, -1 backward, 0 for none or both.
    pub fn move_axis(&self) -> f32 {
        match (self.move_forward, self.move_backward) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// +1 left (counter-clockwise seen from above), -1 right.
    pub fn turn_axis(&self) -> f32 {
        match (self.turn_left, self.turn_right) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Two-phase shot gesture: charge while held, fire on release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotGesture {
    /// 0..1 while held
    pub charge_ratio: f32,
    /// Unit aim direction, if the gesture carries one.
    pub aim: Option<Vector3<f32>>,
    pub released: bool,
}

impl ShotGesture {
    pub fn charging(charge_ratio: f32) -> Self {
        Self { charge_ratio, aim: None, released: false }
    }

    pub fn released(charge_ratio: f32, aim: Option<Vector3<f32>>) -> Self {
        Self { charge_ratio, aim, released: true }
    }

    /// Charge clamped into `0..=1` (non-finite → 0).
    pub fn charge(&self) -> f32 {
        if self.charge_ratio.is_finite() {
            self.charge_ratio.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub intent: IntentSnapshot,
    pub shot: Option<ShotGesture>,
}

impl TickInput {
    pub fn new(intent: IntentSnapshot) -> Self {
        Self { intent, shot: None }
    }

    pub fn with_shot(mut self, shot: ShotGesture) -> Self {
        self.shot = Some(shot);
        self
    }

    /// The gesture, if it was released this tick.
    pub fn released_shot(&self) -> Option<ShotGesture> {
        self.shot.filter(|s| s.released)
    }
}

/// Local intent source (keyboard, pad, touch layer...).
pub trait InputProvider {
    /// Intent for the coming tick. Called exactly once per tick.
    fn poll(&mut self) -> TickInput;
}

/// Provider that never asks for anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputProvider for IdleInput {
    fn poll(&mut self) -> TickInput {
        TickInput::default()
    }
}

impl<F: FnMut() -> TickInput> InputProvider for F {
    fn poll(&mut self) -> TickInput {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_intents_cancel() {
        let intent = IntentSnapshot {
            move_forward: true,
            move_backward: true,
            turn_left: true,
            ..Default::default()
        };
        assert_eq!(intent.move_axis(), 0.0);
        assert_eq!(intent.turn_axis(), 1.0);
        assert!(!intent.is_idle());
        assert!(IntentSnapshot::default().is_idle());
    }

    #[test]
    fn test_only_released_gesture_fires() {
        let held = TickInput::default().with_shot(ShotGesture::charging(0.4));
        assert!(held.released_shot().is_none());

        let fired = TickInput::default().with_shot(ShotGesture::released(1.7, None));
        assert_eq!(fired.released_shot().map(|s| s.charge()), Some(1.0));
    }

    #[test]
    fn test_closure_provider() {
        let mut n = 0;
        let mut provider = || {
            n += 1;
            TickInput::new(IntentSnapshot { jump: n % 2 == 0, ..Default::default() })
        };
        assert!(!provider.poll().intent.jump);
        assert!(provider.poll().intent.jump);
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: TickInput = serde_json::from_str(r#"{"intent": {"sprint": true}}"#).unwrap();
        assert!(input.intent.sprint);
        assert!(!input.intent.move_forward);
        assert!(input.shot.is_none());
    }
}
