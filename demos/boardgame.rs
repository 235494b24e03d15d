//! Frog, snake and donkey board game in the terminal.
//!
//! Human moves are read from stdin as `from_row from_col to_row to_col`.
//!
//! Run: cargo run --bin boardgame -- --one ai --two ai --depth 3

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gamelab_demos::{load_config, make_rng, parse_move, play_out};
use gamelab_search::{Controller, Match, Status};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    Human,
    Ai,
}

/// Play a match, AI against AI or against moves typed on stdin.
#[derive(Parser, Debug)]
struct Args {
    /// RON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Controller of player one
    #[arg(long, value_enum)]
    one: Option<Side>,

    /// Controller of player two
    #[arg(long, value_enum)]
    two: Option<Side>,

    /// Search depth for AI sides
    #[arg(short, long)]
    depth: Option<u32>,

    /// Seed for AI tie-breaks
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many plies
    #[arg(long, default_value = "200")]
    max_plies: usize,
}

fn controller(side: Side, depth: u32) -> Controller {
    match side {
        Side::Human => Controller::Human,
        Side::Ai => Controller::Ai { depth },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut cfg = load_config(args.config.as_deref())?;
    let depth = args.depth.unwrap_or(cfg.game.search.depth);
    if let Some(side) = args.one {
        cfg.game.player_one = controller(side, depth);
    }
    if let Some(side) = args.two {
        cfg.game.player_two = controller(side, depth);
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    // Headless: AI sides move on the next tick.
    cfg.game.ai_delay = 0.0;

    let mut game = Match::with_rng(&cfg.game, make_rng(cfg.seed));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("{}", game.board());

    while !game.status().is_over() && game.history().len() < args.max_plies {
        let side = game.board().to_move();
        match game.controller(side) {
            Some(Controller::Ai { .. }) => {
                let before = game.history().len();
                play_out(&mut game, before + 1, cfg.dt, 1);
                let Some(mv) = game.history().get(before) else {
                    break;
                };
                println!("{side}: {mv}");
                print!("{}", game.board());
            }
            _ => {
                print!("{side}> ");
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    break;
                };
                let mv = match parse_move(&line?) {
                    Ok(mv) => mv,
                    Err(e) => {
                        log::warn!("{e}");
                        continue;
                    }
                };
                match game.play(mv) {
                    Ok(_) => print!("{}", game.board()),
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    match game.status() {
        Status::InProgress => println!("stopped after {} plies", game.history().len()),
        status => println!("{status} after {} plies", game.history().len()),
    }
    Ok(())
}
