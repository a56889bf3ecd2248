//! # Actor
//!
//! One simulated body and its relationship to a ball.
//!
//! ## Tick order
//! ```text
//! Δt sanitise → stamina → timers → intent (poll / queued)
//!   → turn → jump → gravity → ground movement
//!   → possession → dribble → shot
//!   → bounds → pose → pressure → status
//! ```
//!
//! Intent-driven and externally driven actors share this exact pipeline.
//! The control source only decides where the tick's [`TickInput`] comes
//! from and whether rejections are reported to a [`Notifier`], so swapping
//! sources with the same intents gives bit-identical state.

use crate::engine::ball::Ball;
use crate::engine::ball_control::{
    dribble, take_shot, update_possession, ControlContext, PossessionEvent, ShotOutcome,
};
use crate::engine::config::ActorConfig;
use crate::engine::derivation::{
    derive_constants, overall_rating, positional_rating, DerivedConstants,
};
use crate::engine::execution_error::{ErrorModel, ErrorProbabilities, Kick};
use crate::engine::input::{InputProvider, TickInput};
use crate::engine::notify::{Notice, Notifier};
use crate::engine::player_physics::{
    apply_turn, clamp_to_bounds, integrate_horizontal, integrate_vertical, sync_velocity,
    try_jump, JumpOutcome,
};
use crate::engine::pose::{Pose, PoseBlender, PoseSink};
use crate::engine::runtime_state::RuntimeState;
use crate::engine::stamina;
use crate::error::Result;
use crate::models::{ActorAttributes, RoleTag, SkillProfile, TraitSet};
use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an actor's intent comes from.
pub enum ControlSource {
    /// Polls a local provider every tick.
    Local(Box<dyn InputProvider>),
    /// An outside decision process queues intents (or moves the actor itself).
    External,
}

impl ControlSource {
    pub fn is_external(&self) -> bool {
        matches!(self, ControlSource::External)
    }
}

impl fmt::Debug for ControlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlSource::Local(_) => f.write_str("Local"),
            ControlSource::External => f.write_str("External"),
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Δt actually integrated.
    pub dt: f32,
    pub possession: PossessionEvent,
    /// Dribble touch or backward nudge handed to the ball.
    pub touch: Option<Kick>,
    pub jump: Option<JumpOutcome>,
    pub shot: Option<ShotOutcome>,
}

/// Clamp a host-supplied Δt: non-finite or negative → 0, capped at `max`.
pub fn sanitize_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max)
    } else {
        0.0
    }
}

pub struct Actor<R: Rng = ChaCha8Rng> {
    profile: SkillProfile,
    derived: DerivedConstants,
    errors: ErrorModel,
    config: ActorConfig,
    state: RuntimeState,
    control: ControlSource,
    queued: Option<TickInput>,
    pose: PoseBlender,
    pose_sink: Option<Box<dyn PoseSink>>,
    notifier: Option<Box<dyn Notifier>>,
    rng: R,
}

impl Actor<ChaCha8Rng> {
    /// Externally driven actor at the origin with a seeded generator.
    pub fn new(profile: SkillProfile, seed: u64) -> Self {
        Self::with_rng(profile, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Actor<R> {
    /// Build with an injected generator. The profile is copied in.
    pub fn with_rng(profile: SkillProfile, rng: R) -> Self {
        let profile = SkillProfile::new(profile.attributes, profile.traits);
        let derived = derive_constants(&profile.attributes, &profile.traits);
        let errors = ErrorModel::from_profile(&profile.attributes, &profile.traits);
        let state = RuntimeState::new(Vector3::zeros(), derived.max_stamina);
        log::debug!(
            "Actor created: overall {}, top speed {:.2} m/s",
            overall_rating(&profile.attributes),
            derived.max_forward_speed
        );
        Self {
            profile,
            derived,
            errors,
            config: ActorConfig::default(),
            state,
            control: ControlSource::External,
            queued: None,
            pose: PoseBlender::default(),
            pose_sink: None,
            notifier: None,
            rng,
        }
    }

    /// Replace the runtime config. Invalid configs are refused.
    pub fn with_config(mut self, config: ActorConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        let ground = self.config.ground_level;
        if self.state.grounded {
            self.state.position.y = ground;
        }
        Ok(self)
    }

    pub fn with_control(mut self, control: ControlSource) -> Self {
        self.control = control;
        self
    }

    pub fn with_input(self, provider: impl InputProvider + 'static) -> Self {
        self.with_control(ControlSource::Local(Box::new(provider)))
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn with_pose_sink(mut self, sink: impl PoseSink + 'static) -> Self {
        self.pose_sink = Some(Box::new(sink));
        self
    }

    /// Start position; snaps to the ground.
    pub fn at(mut self, position: Vector3<f32>) -> Self {
        self.place_at(position);
        self
    }

    // ========== Per-tick entry point ==========

    /// Advance one tick. `aim` overrides the shot gesture's aim.
    pub fn update(
        &mut self,
        dt: f32,
        ball: &mut dyn Ball,
        aim: Option<Vector3<f32>>,
    ) -> TickReport {
        let dt = sanitize_dt(dt, self.config.max_tick_dt);

        // Fatigue first: everything below scales by this tick's modifier
        stamina::update_stamina(
            &mut self.state,
            &self.derived,
            self.profile.attributes.mental.work_rate,
            &self.config.stamina,
            dt,
        );
        self.advance_timers(dt);

        let input = match &mut self.control {
            ControlSource::Local(provider) => provider.poll(),
            // Nothing queued reads as an idle intent: the body brakes and rests
            ControlSource::External => self.queued.take().unwrap_or_default(),
        };
        let mut report = TickReport {
            dt,
            possession: PossessionEvent::Unchanged,
            touch: None,
            jump: None,
            shot: None,
        };

        // Body
        apply_turn(&mut self.state, &self.derived, &input.intent, dt);
        if input.intent.jump {
            let outcome = try_jump(&mut self.state, &self.derived, &self.config);
            match outcome {
                JumpOutcome::OnCooldown { remaining } => {
                    log::trace!("Jump rejected: cooldown {:.2}s", remaining);
                    self.notify(Notice::JumpOnCooldown { remaining });
                }
                JumpOutcome::NoStamina { stamina, cost } => {
                    log::trace!("Jump rejected: stamina {:.1} < {:.1}", stamina, cost);
                    self.notify(Notice::JumpNoStamina { stamina, cost });
                }
                JumpOutcome::Jumped { .. } | JumpOutcome::Airborne => {}
            }
            report.jump = Some(outcome);
        }
        integrate_vertical(&mut self.state, &self.config, dt);
        integrate_horizontal(&mut self.state, &self.derived, &input.intent, dt);

        // Ball
        let chances = self.error_probabilities();
        let ctx = ControlContext {
            derived: &self.derived,
            attrs: &self.profile.attributes,
            cfg: &self.config,
            chances,
        };
        report.possession = update_possession(&ctx, &mut self.state, ball, &mut self.rng);
        report.touch = dribble(&ctx, &mut self.state, ball, &mut self.rng);

        if let Some(gesture) = input.released_shot() {
            let aim = aim
                .or(gesture.aim)
                .unwrap_or_else(|| self.state.facing());
            let outcome =
                take_shot(&ctx, &mut self.state, ball, gesture.charge(), aim, &mut self.rng);
            if let ShotOutcome::Rejected { distance, control_radius } = outcome {
                self.notify(Notice::ShotOutOfRange { distance, control_radius });
            }
            report.shot = Some(outcome);
        }

        // Wrap-up
        clamp_to_bounds(&mut self.state, &self.config.bounds);
        self.blend_pose(dt);
        stamina::update_pressure(&mut self.state, &self.derived, &self.config.stamina, dt);
        stamina::refresh_status(&mut self.state, &self.derived, &self.config.stamina);

        report
    }

    fn advance_timers(&mut self, dt: f32) {
        let s = &mut self.state;
        s.kick_timer += dt;
        s.jump_cooldown = (s.jump_cooldown - dt).max(0.0);
        s.touch_recovery = (s.touch_recovery - dt).max(0.0);
    }

    fn blend_pose(&mut self, dt: f32) {
        let ratio = self.state.speed() / self.derived.max_forward_speed;
        let pose =
            self.pose.blend(ratio, self.state.is_grounded(), self.state.is_sprinting(), dt);
        if let Some(sink) = self.pose_sink.as_mut() {
            sink.apply_pose(&pose);
        }
    }

    /// Intent-driven actors only.
    fn notify(&mut self, notice: Notice) {
        if self.control.is_external() {
            return;
        }
        if let Some(notifier) = self.notifier.as_mut() {
            notifier.notify(notice);
        }
    }

    // ========== Between-tick operations ==========

    /// Queue the intent an externally driven actor consumes on its next
    /// tick. Ignored by intent-driven actors, which poll their provider.
    pub fn queue_external_input(&mut self, input: TickInput) {
        if !self.control.is_external() {
            log::debug!("Queued input ignored: actor polls a local provider");
            return;
        }
        self.queued = Some(input);
    }

    /// Teleport (kick-off, set pieces). Non-finite coordinates are ignored.
    pub fn place_at(&mut self, position: Vector3<f32>) {
        if !position.iter().all(|c| c.is_finite()) {
            return;
        }
        let s = &mut self.state;
        s.position = position;
        if s.position.y <= self.config.ground_level {
            s.position.y = self.config.ground_level;
            s.grounded = true;
            s.vertical_velocity = 0.0;
        } else {
            s.grounded = false;
        }
        clamp_to_bounds(&mut self.state, &self.config.bounds);
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.state.set_heading(heading);
        sync_velocity(&mut self.state);
    }

    /// Recompute derived constants and error baselines after an editing
    /// session. Never call this mid-tick.
    pub fn refresh_from_attributes(&mut self, attributes: ActorAttributes, traits: TraitSet) {
        self.profile = SkillProfile::new(attributes, traits);
        self.derived = derive_constants(&self.profile.attributes, &self.profile.traits);
        self.errors = ErrorModel::from_profile(&self.profile.attributes, &self.profile.traits);

        let stamina = self.state.stamina();
        self.state.set_stamina(stamina, self.derived.max_stamina);
        stamina::refresh_status(&mut self.state, &self.derived, &self.config.stamina);
        log::info!(
            "Derived constants refreshed: overall {}, top speed {:.2} m/s, control radius {:.2} m",
            self.overall_rating(),
            self.derived.max_forward_speed,
            self.derived.control_radius
        );
    }

    // ========== Read accessors ==========

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn derived(&self) -> &DerivedConstants {
        &self.derived
    }

    pub fn error_model(&self) -> &ErrorModel {
        &self.errors
    }

    /// Error chances under the current pressure and stamina.
    pub fn error_probabilities(&self) -> ErrorProbabilities {
        self.errors
            .with_context(self.state.pressure(), stamina::stamina_ratio(&self.state, &self.derived))
    }

    pub fn attributes(&self) -> &ActorAttributes {
        &self.profile.attributes
    }

    pub fn traits(&self) -> &TraitSet {
        &self.profile.traits
    }

    pub fn profile(&self) -> &SkillProfile {
        &self.profile
    }

    pub fn config(&self) -> &ActorConfig {
        &self.config
    }

    pub fn control_source(&self) -> &ControlSource {
        &self.control
    }

    pub fn pose(&self) -> Pose {
        self.pose.pose
    }

    pub fn overall_rating(&self) -> u8 {
        overall_rating(&self.profile.attributes)
    }

    pub fn positional_rating(&self, role: RoleTag) -> u8 {
        positional_rating(&self.profile.attributes, role)
    }
}

impl<R: Rng> fmt::Debug for Actor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("control", &self.control)
            .field("overall", &self.overall_rating())
            .field("derived", &self.derived)
            .field("state", &self.state)
            .field("queued", &self.queued)
            .finish_non_exhaustive()
    }
}
