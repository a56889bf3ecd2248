//! # of_actor - Single-Actor Runtime Core
//!
//! Turns a static skill profile (1-100 ratings plus positive/negative traits)
//! into per-tick physical behaviour for one sports-game actor: movement,
//! jumping, stamina, ball possession, dribbling, charged shots and
//! skill-calibrated execution errors.
//!
//! ## Features
//! - Deterministic with a seeded generator (same seed + same inputs = same state)
//! - No panics or errors on the tick path: values clamp, bad requests are no-ops
//! - Identical physics for locally controlled and externally driven actors
//!
//! ## Usage
//! ```rust
//! use of_actor::engine::{Actor, PointBall, IntentSnapshot, TickInput};
//! use of_actor::models::SkillProfile;
//!
//! let mut actor = Actor::new(SkillProfile::default(), 42);
//! let mut ball = PointBall::default();
//! actor.queue_external_input(TickInput::new(IntentSnapshot {
//!     move_forward: true,
//!     ..Default::default()
//! }));
//! actor.update(1.0 / 60.0, &mut ball, None);
//! assert!(actor.state().speed() > 0.0);
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::{Actor, ActorConfig, Ball, ControlSource, TickInput};
pub use error::{ActorError, Result};
pub use models::{ActorAttributes, RoleTag, SkillProfile, TraitSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
