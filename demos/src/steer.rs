//! Headless steering scenarios around a leader circling the screen centre.

use std::fmt::Write as _;

use gamelab_core::{Point, Vec2, vector};
use gamelab_flow::{FlowField, MapError};
use gamelab_steer::{Agent, Behavior, SteeringConfig, Surroundings, Target};
use rand::{Rng, RngExt};

use crate::config::DemoConfig;
use crate::flow::build_field;

/// Screen size the agents wrap around.
pub const WORLD: Vec2 = Vec2::new(1920.0, 1080.0);

const LEADER_RADIUS: f32 = 300.0;
/// Radians per second.
const LEADER_SPIN: f32 = 0.5;
const SWARM_SIZE: usize = 12;
const FORMATION_SLOTS: [Vec2; 4] = [
    Vec2::new(-50.0, 50.0),
    Vec2::new(50.0, 50.0),
    Vec2::new(-100.0, 100.0),
    Vec2::new(100.0, 100.0),
];

/// Which set of agents to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One agent per basic behaviour reacting to the leader.
    Chase,
    /// A swarm gathering under attraction and repulsion.
    Swarm,
    /// Followers holding slots behind the leader.
    Formation,
    /// Followers steering along the configured flow field.
    Field,
}

/// A running scenario.
#[derive(Debug, Clone)]
pub struct Simulation {
    scenario: Scenario,
    agents: Vec<Agent>,
    field: Option<FlowField>,
    vision_cone: f32,
    vision_range: f32,
    time: f32,
}

impl Simulation {
    pub fn new<R: Rng>(scenario: Scenario, cfg: &DemoConfig, rng: &mut R) -> Result<Self, MapError> {
        let steer = &cfg.steering;
        let mut field = None;
        let agents = match scenario {
            Scenario::Chase => chasers(steer),
            Scenario::Swarm => (0..SWARM_SIZE)
                .map(|_| {
                    let pos = WORLD * 0.5
                        + Vec2::new(rng.random_range(-200.0..200.0), rng.random_range(-200.0..200.0));
                    Agent::new(pos, Behavior::swarm(steer), steer)
                })
                .collect(),
            Scenario::Formation => {
                let leader = leader_at(0.0);
                FORMATION_SLOTS
                    .iter()
                    .map(|&offset| {
                        let slot = leader.position
                            + Vec2::from_angle(vector::to_radians(leader.heading)).rotate(offset);
                        let mut a = Agent::new(slot, Behavior::formation(offset, steer), steer);
                        a.heading = leader.heading;
                        a
                    })
                    .collect()
            }
            Scenario::Field => {
                let f = build_field(cfg)?;
                let start = f.space().center(f.start());
                let follower = Behavior::FollowField {
                    speed: cfg.field.agent_speed,
                };
                field = Some(f);
                vec![Agent::new(start, follower, steer)]
            }
        };
        Ok(Self {
            scenario,
            agents,
            field,
            vision_cone: steer.vision_cone,
            vision_range: steer.vision_range,
            time: 0.0,
        })
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn field(&self) -> Option<&FlowField> {
        self.field.as_ref()
    }

    /// The leader every behaviour reacts to.
    pub fn leader(&self) -> Target {
        leader_at(self.time)
    }

    /// Advance every agent by `dt` seconds.
    pub fn step<R: Rng>(&mut self, rng: &mut R, dt: f32) {
        self.time += dt;
        let target = self.leader();
        let positions: Vec<Vec2> = self.agents.iter().map(|a| a.position).collect();
        let mut around = Surroundings::new(target).with_neighbors(&positions);
        if let Some(field) = &self.field {
            around = around.with_field(field);
        }
        for agent in &mut self.agents {
            agent.update(&around, rng, dt);
            if self.field.is_none() {
                agent.wrap(WORLD);
            }
        }
    }

    /// Cell of the first agent, when following a field.
    pub fn follower_cell(&self) -> Option<Point> {
        let field = self.field.as_ref()?;
        let agent = self.agents.first()?;
        field.space().cell_at(agent.position)
    }

    /// One line per agent: behaviour, position, speed and whether it can
    /// see the leader.
    pub fn describe(&self) -> String {
        let leader = self.leader();
        let mut out = String::new();
        for agent in &self.agents {
            let sees = agent.can_see(leader.position, self.vision_cone, self.vision_range);
            let _ = writeln!(
                out,
                "{:<16} at ({:7.1}, {:7.1}) speed {:6.1}{}",
                agent.behavior.name(),
                agent.position.x,
                agent.position.y,
                agent.speed(),
                if sees { "  sees leader" } else { "" }
            );
        }
        out
    }
}

fn chasers(cfg: &SteeringConfig) -> Vec<Agent> {
    let corners = [
        Vec2::new(100.0, 100.0),
        Vec2::new(1820.0, 100.0),
        Vec2::new(100.0, 980.0),
        Vec2::new(1820.0, 980.0),
        Vec2::new(960.0, 100.0),
    ];
    let behaviors = [
        Behavior::seek(cfg),
        Behavior::flee(cfg),
        Behavior::arrive(cfg),
        Behavior::pursue(cfg),
        Behavior::wander(cfg),
    ];
    corners
        .into_iter()
        .zip(behaviors)
        .map(|(pos, b)| Agent::new(pos, b, cfg))
        .collect()
}

fn leader_at(time: f32) -> Target {
    let angle = time * LEADER_SPIN;
    let (sin, cos) = angle.sin_cos();
    let velocity = Vec2::new(-sin, cos) * LEADER_RADIUS * LEADER_SPIN;
    Target {
        position: WORLD * 0.5 + Vec2::new(cos, sin) * LEADER_RADIUS,
        velocity,
        heading: vector::heading_of(velocity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamelab_flow::{FieldConfig, SearchMode};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const DT: f32 = 1.0 / 60.0;

    fn run(scenario: Scenario, cfg: &DemoConfig, ticks: u32) -> Simulation {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sim = Simulation::new(scenario, cfg, &mut rng).unwrap();
        for _ in 0..ticks {
            sim.step(&mut rng, DT);
        }
        sim
    }

    #[test]
    fn seekers_head_in_and_fleers_head_out() {
        let sim = run(Scenario::Chase, &DemoConfig::default(), 60);
        let leader = sim.leader().position;
        let towards = |a: &Agent| a.velocity.dot(leader - a.position);
        let agents = sim.agents();
        assert_eq!(agents[0].behavior.name(), "Seek");
        assert!(towards(&agents[0]) > 0.0);
        assert_eq!(agents[1].behavior.name(), "Flee");
        assert!(towards(&agents[1]) < 0.0);
        assert!(towards(&agents[2]) > 0.0);
    }

    #[test]
    fn chase_agents_stay_on_screen() {
        let sim = run(Scenario::Chase, &DemoConfig::default(), 600);
        for a in sim.agents() {
            assert!((0.0..WORLD.x).contains(&a.position.x));
            assert!((0.0..WORLD.y).contains(&a.position.y));
        }
    }

    #[test]
    fn formation_keeps_its_slots() {
        let sim = run(Scenario::Formation, &DemoConfig::default(), 300);
        let leader = sim.leader();
        let rot = Vec2::from_angle(vector::to_radians(leader.heading));
        for (agent, &offset) in sim.agents().iter().zip(FORMATION_SLOTS.iter()) {
            let slot = leader.position + rot.rotate(offset);
            assert!((agent.position - slot).length() < 100.0);
        }
    }

    #[test]
    fn swarm_stays_finite() {
        let sim = run(Scenario::Swarm, &DemoConfig::default(), 300);
        assert_eq!(sim.agents().len(), SWARM_SIZE);
        assert!(sim.agents().iter().all(|a| a.position.is_finite()));
    }

    #[test]
    fn field_follower_reaches_goal() {
        let cfg = DemoConfig {
            field: FieldConfig {
                cols: 10,
                rows: 10,
                cell_size: 20.0,
                start: Point::new(1, 1),
                goal: Point::new(8, 8),
                mode: SearchMode::AStar,
                agent_speed: 60.0,
            },
            ..DemoConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let mut sim = Simulation::new(Scenario::Field, &cfg, &mut rng).unwrap();
        let mut reached = false;
        for _ in 0..1200 {
            sim.step(&mut rng, DT);
            if sim.follower_cell() == Some(Point::new(8, 8)) {
                reached = true;
                break;
            }
        }
        assert!(reached);
    }

    #[test]
    fn describe_lists_every_agent() {
        let sim = run(Scenario::Chase, &DemoConfig::default(), 1);
        let text = sim.describe();
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("Seek"));
    }
}
