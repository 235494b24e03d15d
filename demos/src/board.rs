//! Board-game demo helpers: move parsing and headless AI play.

use std::fmt;

use gamelab_search::{Match, Move, Status};
use rand::Rng;

/// Errors from [`parse_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// Not exactly four coordinates.
    Arity(usize),
    /// A coordinate that is not an integer.
    NotANumber(String),
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity(n) => write!(f, "expected 4 coordinates, got {n}"),
            Self::NotANumber(s) => write!(f, "not a coordinate: {s:?}"),
        }
    }
}

impl std::error::Error for ParseMoveError {}

/// Parse `"fr fc tr tc"`. Commas, parentheses and `->` are accepted as
/// separators, so the [`Move`] display form parses back.
pub fn parse_move(text: &str) -> Result<Move, ParseMoveError> {
    let coords = text
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '-' | '>'))
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| ParseMoveError::NotANumber(s.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    match coords[..] {
        [fr, fc, tr, tc] => Ok(Move::new(fr, fc, tr, tc)),
        _ => Err(ParseMoveError::Arity(coords.len())),
    }
}

/// Tick `game` in steps of `dt` seconds until it is decided, no AI moves
/// for `idle_limit` consecutive ticks, or `max_plies` moves have been
/// played. Returns the final status.
pub fn play_out<R: Rng>(game: &mut Match<R>, max_plies: usize, dt: f32, idle_limit: u32) -> Status {
    let mut idle = 0;
    while !game.status().is_over() && game.history().len() < max_plies {
        if game.update(dt).is_some() {
            idle = 0;
            continue;
        }
        idle += 1;
        if idle >= idle_limit {
            log::warn!("no AI move for {idle} ticks, stopping");
            break;
        }
    }
    game.status()
}
