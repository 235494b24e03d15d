//! Adversarial move search for a small four-in-a-row board game.
//!
//! Two players move animals around a square board (5×5 by default); the
//! first to line up four of their own pieces horizontally, vertically or
//! diagonally wins. Pieces never capture. Each animal kind moves
//! differently:
//!
//! | Kind | Moves |
//! |---|---|
//! | Donkey | one step orthogonally into an empty cell |
//! | Snake | one step in any of eight directions into an empty cell |
//! | Frog | like a snake, or a jump over the first piece in any direction |
//!
//! [`Searcher`] picks moves with depth-limited minimax and alpha-beta
//! pruning over [`Board`] snapshots; [`Match`] alternates turns between
//! human and AI [`Controller`]s.

mod board;
mod eval;
mod game;
mod lines;
mod moves;
mod piece;
mod search;

#[cfg(test)]
mod properties;

pub use board::{Board, BoardError, DEFAULT_SIZE, PieceSource, ROSTER};
pub use eval::{EvalWeights, Heuristic, evaluate, material, threats};
pub use game::{Controller, Match, MatchConfig, MoveError, Status};
pub use lines::{LINE_LEN, Line, check_win, lines};
pub use moves::{Move, generate_moves, piece_moves};
pub use piece::{PieceKind, PieceState, Player};
pub use search::{
    DISCOUNT_HORIZON, SearchConfig, SearchOutcome, Searcher, WIN_SCORE, WinScoring,
};
