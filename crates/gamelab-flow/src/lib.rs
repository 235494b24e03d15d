//! Flow-field pathfinding for grid-based games.
//!
//! A [`FlowField`] owns a [`CostGrid`] and derives two layers from it:
//!
//! - an **integration field** ([`IntegrationField`]): the accumulated cost from
//!   every cell to the goal, computed by FIFO relaxation
//!   ([`IntegrationField::bfs_field`]) or by a goal-rooted A*
//!   ([`IntegrationField::astar_field`]);
//! - a **direction field** ([`DirectionField`]): for every cell, the unit
//!   vector towards its cheapest neighbor.
//!
//! Agents query [`FlowField::direction_at`] with a world position, or let the
//! field step them with [`FlowField::advance`].
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | direction field |
//! | [`WeightedPather`] : [`Pather`] | BFS relaxation |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod agent;
mod astar;
mod bfs;
mod costs;
mod field;
mod flow;
mod integration;
mod map;
mod neighbors;
mod traits;

#[cfg(test)]
mod properties;

pub use costs::{CostGrid, OBSTACLE_COST, PASSABLE_COST};
pub use field::{FieldConfig, FlowField};
pub use flow::DirectionField;
pub use integration::{IntegrationField, SearchMode, UNREACHED};
pub use map::MapError;
pub use neighbors::walkable_neighbors;
pub use traits::{AstarPather, Pather, WeightedPather};
