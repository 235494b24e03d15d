//! Turn orchestration between human and AI players.

use std::fmt;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::board::{Board, DEFAULT_SIZE};
use crate::lines::check_win;
use crate::moves::{Move, generate_moves};
use crate::piece::Player;
use crate::search::{SearchConfig, Searcher};

/// Who picks the moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    /// Moves come in through [`Match::play`].
    Human,
    /// Moves are searched `depth` plies deep by [`Match::update`].
    Ai { depth: u32 },
}

/// Match parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatchConfig {
    pub size: i32,
    pub player_one: Controller,
    pub player_two: Controller,
    /// Seconds an AI waits before moving.
    pub ai_delay: f32,
    pub search: SearchConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            player_one: Controller::Human,
            player_two: Controller::Ai { depth: 3 },
            ai_delay: 0.5,
            search: SearchConfig::default(),
        }
    }
}

/// State of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Player),
    /// The side to move has no legal move.
    Stalemate,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Self::InProgress
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("in progress"),
            Self::Won(p) => write!(f, "{p} wins"),
            Self::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// Reasons [`Match::play`] rejects a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The match is already decided.
    GameOver(Status),
    /// The side to move is controlled by the AI.
    NotHumanTurn(Player),
    /// The move is not legal on the current board.
    Illegal(Move),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameOver(s) => write!(f, "match is over: {s}"),
            Self::NotHumanTurn(p) => write!(f, "{p} is controlled by the AI"),
            Self::Illegal(mv) => write!(f, "illegal move {mv}"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Owns the authoritative board and alternates turns between controllers.
///
/// AI turns are throttled by an explicit cooldown: when an AI side comes to
/// move it waits [`MatchConfig::ai_delay`] seconds of [`update`] time before
/// the search runs. The search always works on a copy of the board.
///
/// [`update`]: Match::update
#[derive(Debug, Clone)]
pub struct Match<R: Rng> {
    board: Board,
    controllers: [Controller; 2],
    ai_delay: f32,
    cooldown: f32,
    searcher: Searcher<R>,
    status: Status,
    history: Vec<Move>,
}

impl Match<ThreadRng> {
    /// A match from the opening position, breaking AI ties with the
    /// thread-local generator.
    pub fn new(config: &MatchConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> Match<R> {
    pub fn with_rng(config: &MatchConfig, rng: R) -> Self {
        Self::from_board(Board::opening(config.size), config, rng)
    }

    /// A match continuing from `board`.
    pub fn from_board(board: Board, config: &MatchConfig, rng: R) -> Self {
        let mut m = Self {
            board,
            controllers: [config.player_one, config.player_two],
            ai_delay: config.ai_delay.max(0.0),
            cooldown: 0.0,
            searcher: Searcher::new(config.search.clone(), rng),
            status: Status::InProgress,
            history: Vec::new(),
        };
        m.status = m.evaluate_status();
        m.cooldown = m.ai_delay;
        m
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Seconds left before the AI to move searches.
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    pub fn controller(&self, player: Player) -> Option<Controller> {
        match player {
            Player::One => Some(self.controllers[0]),
            Player::Two => Some(self.controllers[1]),
            Player::None => None,
        }
    }

    /// Legal moves of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        generate_moves(&self.board)
    }

    /// Play a human move for the side to move.
    pub fn play(&mut self, mv: Move) -> Result<Status, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver(self.status));
        }
        let side = self.board.to_move();
        if let Some(Controller::Ai { .. }) = self.controller(side) {
            return Err(MoveError::NotHumanTurn(side));
        }
        if !self.legal_moves().contains(&mv) {
            log::warn!("{side} tried illegal move {mv}");
            return Err(MoveError::Illegal(mv));
        }
        Ok(self.commit(mv))
    }

    /// Advance the AI cooldown by `dt` seconds and let the AI move when it
    /// runs out. Returns the move the AI played, if any.
    pub fn update(&mut self, dt: f32) -> Option<Move> {
        if self.status.is_over() {
            return None;
        }
        let side = self.board.to_move();
        let Some(Controller::Ai { depth }) = self.controller(side) else {
            return None;
        };
        self.cooldown -= dt;
        if self.cooldown > 0.0 {
            return None;
        }

        let snapshot = self.board.clone();
        let mv = self.searcher.choose_best_move(&snapshot, depth);
        if !mv.is_valid() {
            self.status = Status::Stalemate;
            return None;
        }
        self.commit(mv);
        Some(mv)
    }

    fn commit(&mut self, mv: Move) -> Status {
        let side = self.board.to_move();
        self.board = self.board.apply(mv);
        self.history.push(mv);
        self.cooldown = self.ai_delay;
        self.status = self.evaluate_status();
        log::info!("{side} plays {mv}");
        if self.status.is_over() {
            log::info!("{}", self.status);
        }
        self.status
    }

    fn evaluate_status(&self) -> Status {
        if let Some(winner) = check_win(&self.board) {
            Status::Won(winner)
        } else if generate_moves(&self.board).is_empty() {
            Status::Stalemate
        } else {
            Status::InProgress
        }
    }
}
