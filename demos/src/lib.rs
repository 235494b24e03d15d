//! Shared pieces of the headless gamelab demos.
//!
//! Each binary loads an optional RON [`DemoConfig`], applies its command-line
//! overrides and drives one engine without a window:
//!
//! - `flowfield`: builds a flow field and walks its agent to the goal;
//! - `boardgame`: plays the frog/snake/donkey game, AI against AI or against
//!   moves read from stdin;
//! - `steering`: runs steering agents around a circling leader.

use rand::SeedableRng;
use rand::rngs::SmallRng;

pub mod board;
pub mod config;
pub mod flow;
pub mod steer;

pub use board::{ParseMoveError, parse_move, play_out};
pub use config::{ConfigError, DemoConfig};
pub use flow::{FieldRun, build_field, heat_map, run_field};
pub use steer::{Scenario, Simulation, WORLD};

/// Load `path` if given, otherwise the defaults.
pub fn load_config(path: Option<&std::path::Path>) -> Result<DemoConfig, ConfigError> {
    match path {
        Some(p) => {
            log::info!("loading config from {}", p.display());
            DemoConfig::load(p)
        }
        None => Ok(DemoConfig::default()),
    }
}

/// A generator seeded from `seed`, or from the OS when absent.
pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}
