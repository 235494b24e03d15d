//! Headless steering demo: agents react to a leader circling the screen.
//!
//! Run: cargo run --bin steering -- --scenario formation --seconds 5

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gamelab_demos::{Scenario, Simulation, load_config, make_rng};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Chase,
    Swarm,
    Formation,
    Field,
}

/// Simulate steering agents and print where they end up.
#[derive(Parser, Debug)]
struct Args {
    /// RON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "chase")]
    scenario: Kind,

    /// Simulated seconds
    #[arg(long, default_value = "10")]
    seconds: f32,

    /// Print agent states every this many seconds (0 prints only the end)
    #[arg(long, default_value = "0")]
    every: f32,

    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    let scenario = match args.scenario {
        Kind::Chase => Scenario::Chase,
        Kind::Swarm => Scenario::Swarm,
        Kind::Formation => Scenario::Formation,
        Kind::Field => Scenario::Field,
    };

    let mut rng = make_rng(cfg.seed);
    let mut sim = Simulation::new(scenario, &cfg, &mut rng)?;
    let dt = cfg.dt.max(1e-3);
    let ticks = (args.seconds.max(0.0) / dt).round() as u32;
    let report = if args.every > 0.0 {
        ((args.every / dt).round() as u32).max(1)
    } else {
        u32::MAX
    };

    for tick in 1..=ticks {
        sim.step(&mut rng, dt);
        if tick % report == 0 {
            println!("t = {:.2}s", tick as f32 * dt);
            print!("{}", sim.describe());
        }
    }
    let leader = sim.leader().position;
    println!("{:?} after {:.2}s, leader at ({:.1}, {:.1})", sim.scenario(), ticks as f32 * dt, leader.x, leader.y);
    print!("{}", sim.describe());
    Ok(())
}
