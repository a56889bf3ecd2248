pub mod actor;
pub mod ball;
pub mod ball_control; // possession FSM, dribble cadence, charged shot
pub mod config;
pub mod derivation; // ratings + traits → derived constants
pub mod execution_error;
pub mod input;
pub mod notify;
pub mod physics_constants;
pub mod player_physics;
pub mod pose;
pub mod runtime_state;
pub mod stamina;

#[cfg(test)]
mod actor_tests; // orchestrator scenarios
#[cfg(test)]
pub mod test_fixtures; // shared test helpers

pub use actor::{sanitize_dt, Actor, ControlSource, TickReport};
pub use ball::{Ball, PointBall};
pub use ball_control::{PossessionEvent, ShotOutcome};
pub use config::{ActorConfig, PlayBounds, ShotConfig, StaminaConfig};
pub use derivation::{derive_constants, overall_rating, positional_rating, DerivedConstants};
pub use execution_error::{ErrorModel, ErrorProbabilities, FirstTouch, Kick};
pub use input::{IdleInput, InputProvider, IntentSnapshot, ShotGesture, TickInput};
pub use notify::{Notice, NoticeLog, Notifier};
pub use player_physics::JumpOutcome;
pub use pose::{NullPoseSink, Pose, PoseSink};
pub use runtime_state::{Possession, RuntimeState};
