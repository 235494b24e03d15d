//! Headless flow-field demo: compute a field and walk its agent to the goal.
//!
//! Run: cargo run --bin flowfield -- --map demos/maps/maze.txt --mode astar

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gamelab_core::Point;
use gamelab_demos::{build_field, heat_map, load_config, run_field};
use gamelab_flow::SearchMode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Bfs,
    Astar,
}

/// Walk a flow-field agent from start to goal and print the result.
#[derive(Parser, Debug)]
struct Args {
    /// RON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// ASCII map file (`.` open, `#` wall, `S` start, `G` goal)
    #[arg(short, long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Integration search
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Goal cell as `x,y`
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    goal: Option<Point>,

    /// Ticks to simulate
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Also print the integration heat map
    #[arg(long)]
    heat: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or("expected X,Y")?;
    let x = x.trim().parse().map_err(|e| format!("{x}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("{y}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(path) = &args.map {
        cfg.map = Some(std::fs::read_to_string(path)?);
    }
    if let Some(mode) = args.mode {
        cfg.field.mode = match mode {
            Mode::Bfs => SearchMode::Bfs,
            Mode::Astar => SearchMode::AStar,
        };
    }
    if let Some(ticks) = args.ticks {
        cfg.ticks = ticks;
    }

    let mut field = build_field(&cfg)?;
    if let Some(goal) = args.goal {
        field.set_goal(goal);
    }
    let run = run_field(&mut field, cfg.ticks, cfg.dt);

    print!("{}", field.to_text());
    println!();
    if args.heat {
        print!("{}", heat_map(&field));
        println!();
    }
    println!(
        "{}: {} after {} ticks, {} cells visited, {} recomputes",
        field.mode(),
        if run.reached { "reached goal" } else { "goal not reached" },
        run.ticks,
        run.path_len,
        run.recomputes
    );
    Ok(())
}
