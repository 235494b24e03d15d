//! Steering behaviours for 2D agents.
//!
//! A [`Behavior`] turns an agent's position and its [`Surroundings`] into a
//! [`SteeringOutput`]; an [`Agent`] integrates that output into velocity,
//! position and heading. Behaviours that need a flow field read it through
//! [`Surroundings::with_field`].

mod agent;
mod behavior;
mod config;

pub use agent::Agent;
pub use behavior::{Behavior, SteeringOutput, Surroundings, Target};
pub use config::SteeringConfig;
