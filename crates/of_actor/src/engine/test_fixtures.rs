//! Shared test fixtures: recording collaborators and profile builders.

use crate::engine::ball::Ball;
use crate::engine::input::{InputProvider, IntentSnapshot, ShotGesture, TickInput};
use crate::engine::notify::{Notice, Notifier};
use crate::engine::pose::{Pose, PoseSink};
use crate::models::{ActorAttributes, SkillProfile, TraitSet};
use nalgebra::Vector3;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Ball that records every kick and never moves by itself.
#[derive(Debug, Clone, Default)]
pub struct RecordingBall {
    pub position: Vector3<f32>,
    pub kicks: Vec<(Vector3<f32>, f32)>,
}

impl RecordingBall {
    pub fn at(position: Vector3<f32>) -> Self {
        Self { position, kicks: Vec::new() }
    }

    pub fn kick_count(&self) -> usize {
        self.kicks.len()
    }
}

impl Ball for RecordingBall {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn kick(&mut self, direction: Vector3<f32>, force: f32) {
        self.kicks.push((direction, force));
    }
}

/// Plays back a fixed list of inputs, then idles (or repeats the last one).
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
    repeat_last: bool,
    last: TickInput,
}

impl ScriptedInput {
    pub fn sequence(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self { queue: inputs.into_iter().collect(), repeat_last: false, last: TickInput::default() }
    }

    /// The same input every tick.
    pub fn hold(input: TickInput) -> Self {
        Self { queue: VecDeque::new(), repeat_last: true, last: input }
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        match self.queue.pop_front() {
            Some(input) => {
                self.last = input;
                input
            }
            None if self.repeat_last => self.last,
            None => TickInput::default(),
        }
    }
}

/// Notifier whose notices stay readable after the actor takes ownership.
#[derive(Debug, Clone, Default)]
pub struct SharedNotices(pub Rc<RefCell<Vec<Notice>>>);

impl SharedNotices {
    pub fn notices(&self) -> Vec<Notice> {
        self.0.borrow().clone()
    }
}

impl Notifier for SharedNotices {
    fn notify(&mut self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

/// Pose sink that counts frames and keeps the latest pose.
#[derive(Debug, Clone, Default)]
pub struct SharedPoseSink(pub Rc<RefCell<(usize, Pose)>>);

impl PoseSink for SharedPoseSink {
    fn apply_pose(&mut self, pose: &Pose) {
        let mut inner = self.0.borrow_mut();
        inner.0 += 1;
        inner.1 = *pose;
    }
}

// ========== Inputs ==========

pub fn run_forward(sprint: bool) -> TickInput {
    TickInput::new(IntentSnapshot { move_forward: true, sprint, ..Default::default() })
}

/// Forward while turning left: circles near the start point, clear of the touchlines.
pub fn run_laps(sprint: bool) -> TickInput {
    TickInput::new(IntentSnapshot { move_forward: true, turn_left: true, sprint, ..Default::default() })
}

pub fn jump_input() -> TickInput {
    TickInput::new(IntentSnapshot { jump: true, ..Default::default() })
}

pub fn shoot_input(charge: f32) -> TickInput {
    TickInput::default().with_shot(ShotGesture::released(charge, None))
}

// ========== Profiles ==========

/// Every skill at `rating`, no traits.
pub fn uniform_profile(rating: u8) -> SkillProfile {
    SkillProfile::new(ActorAttributes::uniform(rating), TraitSet::default())
}

pub fn profile_with(rating: u8, skills: &[(&str, f32)]) -> SkillProfile {
    let mut attrs = ActorAttributes::uniform(rating);
    for (name, value) in skills {
        if let Err(err) = attrs.set(name, *value) {
            panic!("fixture uses unknown skill: {}", err);
        }
    }
    SkillProfile::new(attrs, TraitSet::default())
}

pub fn pace_profile(pace: f32) -> SkillProfile {
    profile_with(50, &[("pace", pace), ("acceleration", pace)])
}
