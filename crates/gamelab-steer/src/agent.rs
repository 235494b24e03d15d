use gamelab_core::{Vec2, vector};
use rand::Rng;

use crate::behavior::{Behavior, Surroundings, SteeringOutput, Target};
use crate::config::SteeringConfig;

/// A steered 2D entity.
///
/// Velocity eases towards the behaviour's requested velocity at
/// `accel_rate` per second and is then clamped to `max_speed`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Screen heading in degrees, in `[0, 360)`.
    pub heading: f32,
    pub max_speed: f32,
    pub accel_rate: f32,
    pub behavior: Behavior,
    /// Inactive agents neither steer nor move.
    pub active: bool,
}

impl Agent {
    pub fn new(position: Vec2, behavior: Behavior, cfg: &SteeringConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            heading: 0.0,
            max_speed: cfg.max_speed,
            accel_rate: cfg.accel_rate,
            behavior,
            active: true,
        }
    }

    /// Run the behaviour and integrate its output over `dt` seconds.
    pub fn update<R: Rng>(&mut self, around: &Surroundings<'_>, rng: &mut R, dt: f32) -> SteeringOutput {
        if !self.active {
            return SteeringOutput::ZERO;
        }
        let steering = self
            .behavior
            .steer(self.position, self.heading, around, rng, dt);
        self.integrate(steering, dt);
        steering
    }

    /// Apply `steering` for `dt` seconds.
    pub fn integrate(&mut self, steering: SteeringOutput, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let blend = (self.accel_rate * dt).min(1.0);
        self.velocity += (steering.linear - self.velocity) * blend;
        self.velocity = vector::truncate(self.velocity, self.max_speed);
        self.position += self.velocity * dt;
        self.heading = vector::wrap_degrees(self.heading + steering.angular * dt);
    }

    pub fn speed(&self) -> f32 {
        vector::length(self.velocity)
    }

    /// Wrap the position around a `[0, extent)` world, like a screen.
    pub fn wrap(&mut self, extent: Vec2) {
        if extent.x > 0.0 {
            self.position.x = self.position.x.rem_euclid(extent.x);
        }
        if extent.y > 0.0 {
            self.position.y = self.position.y.rem_euclid(extent.y);
        }
    }

    /// Whether `point` lies within `range` and inside the vision cone of
    /// `cone` degrees centred on the heading.
    pub fn can_see(&self, point: Vec2, cone: f32, range: f32) -> bool {
        let to = point - self.position;
        let distance = vector::length(to);
        if distance > range {
            return false;
        }
        if distance == 0.0 {
            return true;
        }
        let forward = vector::heading_vector(self.heading);
        let cos = forward.dot(to / distance).clamp(-1.0, 1.0);
        vector::to_degrees(cos.acos()) < cone * 0.5
    }

    /// This agent seen as a target for another agent.
    pub fn as_target(&self) -> Target {
        Target {
            position: self.position,
            velocity: self.velocity,
            heading: self.heading,
        }
    }
}
