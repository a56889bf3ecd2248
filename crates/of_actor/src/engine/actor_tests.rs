//! Orchestrator scenarios: whole ticks through `Actor::update`.

use super::actor::{Actor, ControlSource, TickReport};
use super::ball_control::{PossessionEvent, ShotOutcome};
use super::config::ActorConfig;
use super::execution_error::clamp_chance;
use super::input::{IdleInput, IntentSnapshot, ShotGesture, TickInput};
use super::notify::Notice;
use super::physics_constants::error_model::ERROR_FLOOR;
use super::player_physics::JumpOutcome;
use super::stamina::stamina_ratio;
use super::test_fixtures::*;
use crate::models::{ActorAttributes, RoleTag, TraitSet};
use nalgebra::Vector3;
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn ball_ahead(z: f32) -> RecordingBall {
    RecordingBall::at(Vector3::new(0.0, 0.0, z))
}

fn local_actor(rating: u8, inputs: Vec<TickInput>) -> Actor {
    Actor::new(uniform_profile(rating), 7)
        .with_config(ActorConfig::deterministic())
        .unwrap()
        .with_input(ScriptedInput::sequence(inputs))
}

fn assert_invariants(actor: &Actor) {
    let s = actor.state();
    let d = actor.derived();
    let bounds = &actor.config().bounds;

    assert!(s.stamina() >= 0.0 && s.stamina() <= d.max_stamina, "stamina {}", s.stamina());
    assert!((0.5..=1.0).contains(&s.performance_modifier()));
    assert!((0.0..=1.0).contains(&s.confidence()));
    assert!((0.0..=1.0).contains(&s.pressure()));
    assert!(s.jump_cooldown() >= 0.0);
    assert!(s.touch_recovery() >= 0.0);
    assert_eq!(s.is_exhausted(), stamina_ratio(s, d) < 0.2);

    let p = s.position();
    assert!(p.iter().all(|c| c.is_finite()), "{:?}", p);
    assert!(bounds.contains(p.x, p.z), "{:?}", p);
    assert!(p.y >= actor.config().ground_level);

    for chance in actor.error_probabilities().values() {
        assert!((ERROR_FLOOR..=1.0).contains(&chance));
        assert_eq!(clamp_chance(chance), chance);
    }
}

#[test]
fn test_fast_profile_derives_faster_constants() {
    let fast = Actor::new(pace_profile(90.0), 1);
    let slow = Actor::new(pace_profile(10.0), 1);
    assert!(fast.derived().max_forward_speed > slow.derived().max_forward_speed);
    assert!(fast.derived().acceleration > slow.derived().acceleration);
}

#[test]
fn test_shot_out_of_range_never_kicks_ball() {
    let notices = SharedNotices::default();
    let mut actor = Actor::new(uniform_profile(60), 3)
        .with_input(ScriptedInput::sequence([shoot_input(0.7)]))
        .with_notifier(notices.clone());
    let mut ball = ball_ahead(2.0 * actor.derived().control_radius);

    let report = actor.update(DT, &mut ball, None);
    assert!(matches!(report.shot, Some(ShotOutcome::Rejected { .. })));
    assert_eq!(ball.kick_count(), 0);
    assert!(matches!(notices.notices().as_slice(), [Notice::ShotOutOfRange { .. }]));
}

#[test]
fn test_external_actor_rejections_are_silent() {
    let notices = SharedNotices::default();
    let mut actor = Actor::new(uniform_profile(60), 3).with_notifier(notices.clone());
    let mut ball = ball_ahead(2.0 * actor.derived().control_radius);

    actor.queue_external_input(shoot_input(0.7));
    let report = actor.update(DT, &mut ball, None);
    assert!(matches!(report.shot, Some(ShotOutcome::Rejected { .. })));
    assert_eq!(ball.kick_count(), 0);
    assert!(notices.notices().is_empty());
}

#[test]
fn test_sweet_spot_shot_is_most_accurate() {
    let accuracy_for = |charge: f32| {
        let mut actor = local_actor(60, vec![shoot_input(charge)]);
        let mut ball = ball_ahead(0.3);
        match actor.update(DT, &mut ball, Some(Vector3::z())).shot {
            Some(ShotOutcome::Struck { accuracy, .. }) => accuracy,
            other => panic!("expected a struck shot, got {:?}", other),
        }
    };
    let cfg = ActorConfig::default().shot;
    let best = accuracy_for(cfg.sweet_spot_mid());
    assert_eq!(best, 1.0);
    assert!(accuracy_for(0.1) < best);
}

#[test]
fn test_aim_parameter_overrides_gesture_aim() {
    let gesture = ShotGesture::released(0.7, Some(Vector3::new(-1.0, 0.0, 0.0)));
    let mut actor = local_actor(60, vec![TickInput::default().with_shot(gesture)]);
    let mut ball = ball_ahead(0.3);
    actor.update(DT, &mut ball, Some(Vector3::new(1.0, 0.0, 0.0)));
    let (direction, _) = *ball.kicks.last().unwrap();
    assert!(direction.x > 0.9);

    let mut actor = local_actor(60, vec![TickInput::default().with_shot(gesture)]);
    let mut ball = ball_ahead(0.3);
    actor.update(DT, &mut ball, None);
    let (direction, _) = *ball.kicks.last().unwrap();
    assert!(direction.x < -0.9);
}

#[test]
fn test_idle_actor_settles_rested_and_grounded() {
    let mut inputs = vec![run_laps(true); 600];
    inputs.push(TickInput::default());
    let mut actor = local_actor(50, inputs);
    let mut ball = RecordingBall::at(Vector3::new(40.0, 0.0, -30.0));

    for _ in 0..600 {
        actor.update(0.1, &mut ball, None);
    }
    assert!(actor.state().stamina() < actor.derived().max_stamina);

    // Script exhausted: idle intents from here on
    for _ in 0..6000 {
        actor.update(0.1, &mut ball, None);
        assert!(actor.state().is_grounded());
    }
    assert_eq!(actor.state().stamina(), actor.derived().max_stamina);
    assert_eq!(actor.state().speed(), 0.0);
    assert_eq!(actor.state().performance_modifier(), 1.0);
}

#[test]
fn test_sprint_until_exhausted_then_sprint_refused() {
    let mut actor = local_actor(50, vec![run_laps(true); 400]);
    let mut ball = RecordingBall::at(Vector3::new(40.0, 0.0, -30.0));

    let mut was_exhausted = false;
    for _ in 0..400 {
        let exhausted_before = actor.state().is_exhausted();
        actor.update(0.1, &mut ball, None);
        assert_invariants(&actor);
        if exhausted_before {
            was_exhausted = true;
            assert!(!actor.state().is_sprinting());
        }
    }
    assert!(was_exhausted);
}

#[test]
fn test_control_sources_reach_identical_state() {
    let mut script = Vec::new();
    script.extend(std::iter::repeat(run_forward(false)).take(40));
    script.push(TickInput::new(IntentSnapshot {
        move_forward: true,
        jump: true,
        ..Default::default()
    }));
    script.extend(std::iter::repeat(run_forward(true)).take(30));
    script.push(TickInput::new(IntentSnapshot { turn_left: true, ..Default::default() }));
    script.push(run_forward(false).with_shot(ShotGesture::released(0.65, None)));
    script.extend(std::iter::repeat(TickInput::default()).take(30));

    let profile = uniform_profile(55);
    let mut local = Actor::new(profile.clone(), 99).with_input(ScriptedInput::sequence(script.clone()));
    let mut external = Actor::new(profile, 99);
    let mut local_ball = ball_ahead(0.6);
    let mut external_ball = ball_ahead(0.6);

    for input in &script {
        let a: TickReport = local.update(DT, &mut local_ball, None);
        external.queue_external_input(*input);
        let b = external.update(DT, &mut external_ball, None);
        assert_eq!(a, b);
    }
    assert_eq!(local.state(), external.state());
    assert_eq!(local.pose(), external.pose());
    assert_eq!(local_ball.kicks, external_ball.kicks);
    assert!(!local_ball.kicks.is_empty());
}

#[test]
fn test_external_actor_without_intent_stays_put() {
    let mut actor = Actor::new(uniform_profile(50), 5).at(Vector3::new(3.0, 0.0, -2.0));
    let mut ball = RecordingBall::at(Vector3::new(30.0, 0.0, 0.0));
    for _ in 0..30 {
        let report = actor.update(DT, &mut ball, None);
        assert!(report.jump.is_none());
        assert!(report.shot.is_none());
    }
    assert_eq!(actor.state().position(), Vector3::new(3.0, 0.0, -2.0));
}

#[test]
fn test_external_actor_left_idle_matches_local_idle() {
    let run = vec![run_forward(false); 60];
    let mut local = local_actor(50, run.clone());
    let mut external = Actor::new(uniform_profile(50), 7)
        .with_config(ActorConfig::deterministic())
        .unwrap();
    let mut local_ball = RecordingBall::at(Vector3::new(40.0, 0.0, -30.0));
    let mut external_ball = local_ball.clone();

    for input in &run {
        external.queue_external_input(*input);
        local.update(DT, &mut local_ball, None);
        external.update(DT, &mut external_ball, None);
    }
    assert!(external.state().speed() > 1.0);

    // Nothing queued from here on
    for _ in 0..6000 {
        let a = local.update(0.1, &mut local_ball, None);
        let b = external.update(0.1, &mut external_ball, None);
        assert_eq!(a, b);
    }
    assert_eq!(local.state(), external.state());
    assert_eq!(external.state().speed(), 0.0);
    assert_eq!(external.state().stamina(), external.derived().max_stamina);

    let parked = external.state().position();
    external.update(0.1, &mut external_ball, None);
    assert_eq!(external.state().position(), parked);
}

#[test]
fn test_external_actor_left_idle_stops_dribbling() {
    let mut actor = Actor::new(uniform_profile(60), 3);
    let mut ball = ball_ahead(0.4);
    for _ in 0..30 {
        actor.queue_external_input(run_forward(false));
        actor.update(DT, &mut ball, None);
        ball.position = actor.state().position() + actor.state().facing() * 0.4;
    }

    let mut touches_at_rest = 0;
    for _ in 0..300 {
        let report = actor.update(DT, &mut ball, None);
        if actor.state().speed() == 0.0 && report.touch.is_some() {
            touches_at_rest += 1;
        }
    }
    assert_eq!(actor.state().speed(), 0.0);
    assert_eq!(touches_at_rest, 0);
}

#[test]
fn test_running_into_touchline_stops_actor() {
    let mut actor = local_actor(50, vec![run_forward(false); 900]);
    let mut ball = RecordingBall::at(Vector3::new(40.0, 0.0, -30.0));
    for _ in 0..900 {
        actor.update(DT, &mut ball, None);
    }
    let s = actor.state();
    assert_eq!(s.position().z, actor.config().bounds.max_z);
    assert!(s.speed().abs() < 1e-4);
    assert!(s.velocity().norm() < 1e-4);
}

#[test]
fn test_queue_ignored_for_local_actor() {
    let mut actor = Actor::new(uniform_profile(50), 5).with_input(IdleInput);
    let mut ball = RecordingBall::at(Vector3::new(30.0, 0.0, 0.0));
    actor.queue_external_input(run_forward(true));
    actor.update(DT, &mut ball, None);
    assert_eq!(actor.state().speed(), 0.0);
}

#[test]
fn test_jump_cooldown_is_reported() {
    let mut cfg = ActorConfig::default();
    cfg.jump_cooldown = 3.0;
    let mut script = vec![jump_input()];
    script.extend(std::iter::repeat(TickInput::default()).take(90));
    script.push(jump_input());

    let notices = SharedNotices::default();
    let mut actor = Actor::new(uniform_profile(50), 11)
        .with_config(cfg)
        .unwrap()
        .with_input(ScriptedInput::sequence(script.clone()))
        .with_notifier(notices.clone());
    let mut ball = RecordingBall::at(Vector3::new(30.0, 0.0, 0.0));

    let first = actor.update(DT, &mut ball, None);
    assert!(matches!(first.jump, Some(JumpOutcome::Jumped { .. })));
    assert!(!actor.state().is_grounded());

    let mut last = first;
    for _ in 1..script.len() {
        last = actor.update(DT, &mut ball, None);
    }
    assert!(actor.state().is_grounded());
    assert!(matches!(last.jump, Some(JumpOutcome::OnCooldown { .. })));
    assert!(matches!(notices.notices().as_slice(), [Notice::JumpOnCooldown { .. }]));
}

#[test]
fn test_dribbling_run_touches_ball_on_cadence() {
    let mut actor = local_actor(70, vec![run_forward(false); 120]);
    // Ball that follows just ahead of the actor, like a well-kept dribble
    let mut ball = ball_ahead(0.4);
    let mut touches = 0;
    for _ in 0..120 {
        let report = actor.update(DT, &mut ball, None);
        if report.touch.is_some() {
            touches += 1;
        }
        ball.position = actor.state().position() + actor.state().facing() * 0.4;
        assert_ne!(report.possession, PossessionEvent::Released);
    }
    assert!(actor.state().is_dribbling());
    let expected = (120.0 * DT / actor.derived().kick_interval) as i32;
    assert!((touches - expected).abs() <= 2, "touches {touches}, expected ~{expected}");
}

#[test]
fn test_adversarial_dt_keeps_invariants() {
    let mut actor = local_actor(40, vec![run_forward(true); 50]);
    let mut ball = ball_ahead(0.5);
    for dt in [f32::NAN, -1.0, f32::INFINITY, 1e9, 0.0, 5.0, f32::NEG_INFINITY] {
        let report = actor.update(dt, &mut ball, None);
        assert!(report.dt >= 0.0 && report.dt <= actor.config().max_tick_dt);
        assert_invariants(&actor);
    }
}

#[test]
fn test_refresh_recomputes_constants_and_clamps_stamina() {
    let mut actor = Actor::new(uniform_profile(90), 2);
    let before = *actor.derived();
    assert_eq!(actor.state().stamina(), before.max_stamina);

    actor.refresh_from_attributes(ActorAttributes::uniform(10), TraitSet::default());
    let after = *actor.derived();
    assert!(after.max_forward_speed < before.max_forward_speed);
    assert_eq!(actor.state().stamina(), after.max_stamina);
    assert_eq!(actor.overall_rating(), 10);
    assert_eq!(actor.positional_rating(RoleTag::Midfielder), 10);
}

#[test]
fn test_pose_sink_receives_every_tick() {
    let sink = SharedPoseSink::default();
    let mut actor = local_actor(50, vec![run_forward(false); 20]).with_pose_sink(sink.clone());
    let mut ball = RecordingBall::at(Vector3::new(30.0, 0.0, 0.0));
    for _ in 0..20 {
        actor.update(DT, &mut ball, None);
    }
    let (frames, pose) = *sink.0.borrow();
    assert_eq!(frames, 20);
    assert_eq!(pose, actor.pose());
    assert!(pose.torso_tilt > 0.0);
}

#[test]
fn test_same_seed_same_outcome() {
    let run = |seed: u64| {
        let mut actor = Actor::new(uniform_profile(35), seed)
            .with_input(ScriptedInput::hold(run_forward(true)));
        let mut ball = ball_ahead(0.5);
        for _ in 0..200 {
            actor.update(DT, &mut ball, None);
            ball.position = actor.state().position() + actor.state().facing() * 0.5;
        }
        (actor.state().clone(), ball.kicks)
    };
    assert_eq!(run(4), run(4));
}

#[test]
fn test_tick_report_serializes_for_replay() {
    let mut actor = local_actor(60, vec![shoot_input(0.7)]);
    let mut ball = ball_ahead(0.3);
    let report = actor.update(DT, &mut ball, None);

    let json = serde_json::to_string(&report).unwrap();
    let back: TickReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_control_source_is_reported() {
    let local = Actor::new(uniform_profile(50), 1).with_control(ControlSource::Local(Box::new(IdleInput)));
    assert!(!local.control_source().is_external());
    assert!(Actor::new(uniform_profile(50), 1).control_source().is_external());
    assert!(format!("{:?}", local).contains("Local"));
}

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<[bool; 6]>(), prop::option::of((0.0f32..=1.0, any::<bool>()))).prop_map(|(b, shot)| {
        let intent = IntentSnapshot {
            move_forward: b[0],
            move_backward: b[1],
            turn_left: b[2],
            turn_right: b[3],
            sprint: b[4],
            jump: b[5],
        };
        let input = TickInput::new(intent);
        match shot {
            Some((charge, true)) => input.with_shot(ShotGesture::released(charge, None)),
            Some((charge, false)) => input.with_shot(ShotGesture::charging(charge)),
            None => input,
        }
    })
}

fn arb_dt() -> impl Strategy<Value = f32> {
    prop_oneof![
        4 => 0.0f32..0.2,
        1 => Just(f32::NAN),
        1 => Just(-0.5f32),
        1 => Just(1e6f32),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_any_tick_sequence_keeps_invariants(
        rating in 1u8..=100,
        seed in any::<u64>(),
        ticks in prop::collection::vec((arb_input(), arb_dt()), 1..120),
    ) {
        let mut actor = Actor::new(uniform_profile(rating), seed);
        let mut ball = ball_ahead(0.5);
        for (input, dt) in ticks {
            actor.queue_external_input(input);
            actor.update(dt, &mut ball, None);
            assert_invariants(&actor);
        }
    }
}
