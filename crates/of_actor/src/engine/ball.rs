//! Ball collaborator.
//!
//! The actor never owns the ball. It reads the position and hands out
//! impulses; everything else (flight, bounces, other actors' touches) is the
//! host's business.

use crate::engine::physics_constants::world;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// What the actor core needs from a ball.
///
/// Hosts running several actors against one ball on different threads must
/// synchronise inside their implementation.
pub trait Ball {
    /// Current centre position (m).
    fn position(&self) -> Vector3<f32>;

    /// Apply an impulse. `direction` is a unit vector; `force` is the
    /// resulting speed change in m/s for a unit-mass ball.
    fn kick(&mut self, direction: Vector3<f32>, force: f32);
}

/// Minimal point-mass ball for headless hosts, benches and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointBall {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    /// Ground speed lost per second while rolling (m/s²)
    pub rolling_friction: f32,
    /// Share of vertical speed kept on a bounce
    pub restitution: f32,
}

impl Default for PointBall {
    fn default() -> Self {
        Self::at(Vector3::zeros())
    }
}

impl PointBall {
    pub fn at(position: Vector3<f32>) -> Self {
        Self { position, velocity: Vector3::zeros(), rolling_friction: 1.5, restitution: 0.5 }
    }

    /// Advance flight and roll by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let airborne = self.position.y > world::GROUND_LEVEL || self.velocity.y > 0.0;
        if airborne {
            self.velocity.y -= world::GRAVITY * dt;
        } else {
            let ground = Vector3::new(self.velocity.x, 0.0, self.velocity.z);
            let speed = ground.norm();
            if speed > 0.0 {
                let slowed = (speed - self.rolling_friction * dt).max(0.0);
                let scaled = ground * (slowed / speed);
                self.velocity.x = scaled.x;
                self.velocity.z = scaled.z;
            }
        }

        self.position += self.velocity * dt;

        if self.position.y < world::GROUND_LEVEL {
            self.position.y = world::GROUND_LEVEL;
            self.velocity.y = -self.velocity.y * self.restitution;
            if self.velocity.y < 0.5 {
                self.velocity.y = 0.0;
            }
        }
    }

    pub fn ground_speed(&self) -> f32 {
        Vector3::new(self.velocity.x, 0.0, self.velocity.z).norm()
    }
}

impl Ball for PointBall {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn kick(&mut self, direction: Vector3<f32>, force: f32) {
        if force.is_finite() && direction.iter().all(|c| c.is_finite()) {
            self.velocity = direction * force;
        }
    }
}
