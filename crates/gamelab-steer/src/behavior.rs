//! Steering behaviours as a closed set of variants.

use gamelab_core::{Vec2, vector};
use gamelab_flow::FlowField;
use rand::{Rng, RngExt};

use crate::config::SteeringConfig;

/// Requested motion for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringOutput {
    /// Desired velocity.
    pub linear: Vec2,
    /// Turn rate in degrees per second.
    pub angular: f32,
}

impl SteeringOutput {
    pub const ZERO: Self = Self {
        linear: Vec2::ZERO,
        angular: 0.0,
    };

    pub fn linear(linear: Vec2) -> Self {
        Self {
            linear,
            angular: 0.0,
        }
    }

    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            linear: self.linear + other.linear,
            angular: self.angular + other.angular,
        }
    }

    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self {
            linear: self.linear * factor,
            angular: self.angular * factor,
        }
    }
}

/// The entity a behaviour reacts to, usually the player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Screen heading in degrees.
    pub heading: f32,
}

impl Target {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Everything outside the agent a behaviour may look at.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a> {
    pub target: Target,
    /// Positions of the other members of the agent's swarm.
    pub neighbors: &'a [Vec2],
    pub field: Option<&'a FlowField>,
}

impl<'a> Surroundings<'a> {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            neighbors: &[],
            field: None,
        }
    }

    pub fn with_neighbors(mut self, neighbors: &'a [Vec2]) -> Self {
        self.neighbors = neighbors;
        self
    }

    pub fn with_field(mut self, field: &'a FlowField) -> Self {
        self.field = Some(field);
        self
    }
}

/// Below this leader speed a formation holds still.
const FORMATION_MIN_LEADER_SPEED: f32 = 10.0;

/// Swarm neighbours closer than this are ignored.
const SWARM_MIN_DISTANCE: f32 = 1e-4;

/// A steering behaviour and its per-agent state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// No steering at all.
    Idle,
    /// Head straight for the target.
    Seek { speed: f32 },
    /// Head straight away from the target.
    Flee { speed: f32 },
    /// Seek, slowing down linearly inside `slowing_radius`.
    Arrive { max_speed: f32, slowing_radius: f32 },
    /// Seek the target's predicted position, looking at most
    /// `max_prediction` seconds ahead.
    Pursue { speed: f32, max_prediction: f32 },
    /// Drift along a heading nudged at random every `interval` seconds.
    Wander {
        speed: f32,
        interval: f32,
        timer: f32,
        direction: Vec2,
    },
    /// Pairwise attraction/repulsion with the neighbours:
    /// `U(d) = -a / d^n + b / d^m` along the separating direction.
    Swarm { a: f32, b: f32, n: f32, m: f32 },
    /// Arrive at `offset` rotated into the target's frame and turn to match
    /// its heading.
    FormationFollow {
        offset: Vec2,
        max_speed: f32,
        slowing_radius: f32,
        turn_rate: f32,
    },
    /// Follow the flow field's direction at the agent's position.
    FollowField { speed: f32 },
}

impl Behavior {
    pub fn seek(cfg: &SteeringConfig) -> Self {
        Self::Seek {
            speed: cfg.seek_speed,
        }
    }

    pub fn flee(cfg: &SteeringConfig) -> Self {
        Self::Flee {
            speed: cfg.flee_speed,
        }
    }

    pub fn arrive(cfg: &SteeringConfig) -> Self {
        Self::Arrive {
            max_speed: cfg.arrive_speed,
            slowing_radius: cfg.slowing_radius,
        }
    }

    pub fn pursue(cfg: &SteeringConfig) -> Self {
        Self::Pursue {
            speed: cfg.pursue_speed,
            max_prediction: 0.0,
        }
    }

    pub fn wander(cfg: &SteeringConfig) -> Self {
        Self::Wander {
            speed: cfg.wander_speed,
            interval: cfg.wander_interval,
            timer: 0.0,
            direction: Vec2::X,
        }
    }

    pub fn swarm(cfg: &SteeringConfig) -> Self {
        Self::Swarm {
            a: cfg.swarm_a,
            b: cfg.swarm_b,
            n: cfg.swarm_n,
            m: cfg.swarm_m,
        }
    }

    pub fn formation(offset: Vec2, cfg: &SteeringConfig) -> Self {
        Self::FormationFollow {
            offset,
            max_speed: cfg.max_speed,
            slowing_radius: cfg.slowing_radius,
            turn_rate: cfg.turn_rate,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Seek { .. } => "Seek",
            Self::Flee { .. } => "Flee",
            Self::Arrive { .. } => "Arrive",
            Self::Pursue { .. } => "Pursue",
            Self::Wander { .. } => "Wander",
            Self::Swarm { .. } => "Swarm",
            Self::FormationFollow { .. } => "FormationFollow",
            Self::FollowField { .. } => "FollowField",
        }
    }

    /// Steering for an agent at `position` facing `heading` degrees.
    pub fn steer<R: Rng>(
        &mut self,
        position: Vec2,
        heading: f32,
        around: &Surroundings<'_>,
        rng: &mut R,
        dt: f32,
    ) -> SteeringOutput {
        let target = around.target;
        match self {
            Self::Idle => SteeringOutput::ZERO,
            Self::Seek { speed } => {
                SteeringOutput::linear(vector::normalize(target.position - position) * *speed)
            }
            Self::Flee { speed } => {
                SteeringOutput::linear(vector::normalize(position - target.position) * *speed)
            }
            Self::Arrive {
                max_speed,
                slowing_radius,
            } => SteeringOutput::linear(arrive(position, target.position, *max_speed, *slowing_radius)),
            Self::Pursue {
                speed,
                max_prediction,
            } => {
                let distance = vector::length(target.position - position);
                let lookahead = if *speed > 0.0 {
                    (distance / *speed).min(*max_prediction)
                } else {
                    0.0
                };
                let aim = target.position + target.velocity * lookahead;
                SteeringOutput::linear(vector::normalize(aim - position) * *speed)
            }
            Self::Wander {
                speed,
                interval,
                timer,
                direction,
            } => {
                *timer += dt;
                if *timer >= *interval {
                    let nudge = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
                    let turned = vector::normalize(*direction + nudge);
                    if turned != Vec2::ZERO {
                        *direction = turned;
                        log::trace!("wander direction now {turned}");
                    }
                    *timer = 0.0;
                }
                SteeringOutput::linear(*direction * *speed)
            }
            Self::Swarm { a, b, n, m } => {
                let mut force = Vec2::ZERO;
                for &other in around.neighbors {
                    let r = position - other;
                    let d = vector::length(r);
                    if d < SWARM_MIN_DISTANCE {
                        continue;
                    }
                    let u = -*a / d.powf(*n) + *b / d.powf(*m);
                    force += r / d * u;
                }
                SteeringOutput::linear(force * dt)
            }
            Self::FormationFollow {
                offset,
                max_speed,
                slowing_radius,
                turn_rate,
            } => {
                let slot = target.position
                    + Vec2::from_angle(vector::to_radians(target.heading)).rotate(*offset);
                let mut linear = arrive(position, slot, *max_speed, *slowing_radius);
                if vector::length(target.velocity) < FORMATION_MIN_LEADER_SPEED {
                    linear = Vec2::ZERO;
                }
                let diff = vector::wrap_degrees(target.heading - heading + 180.0) - 180.0;
                let max_turn = *turn_rate * dt;
                let angular = if dt > 0.0 {
                    diff.clamp(-max_turn, max_turn) / dt
                } else {
                    0.0
                };
                SteeringOutput { linear, angular }
            }
            Self::FollowField { speed } => {
                let dir = around
                    .field
                    .map_or(Vec2::ZERO, |field| field.direction_at(position));
                SteeringOutput::linear(dir * *speed)
            }
        }
    }
}

fn arrive(position: Vec2, goal: Vec2, max_speed: f32, slowing_radius: f32) -> Vec2 {
    let offset = goal - position;
    let distance = vector::length(offset);
    let speed = if distance < slowing_radius {
        max_speed * (distance / slowing_radius)
    } else {
        max_speed
    };
    vector::normalize(offset) * speed
}
