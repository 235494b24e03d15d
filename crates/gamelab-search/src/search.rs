//! Minimax with alpha-beta pruning.
//!
//! The searcher scores each candidate move of the side to move by letting
//! the opponent reply optimally, then picks uniformly at random among the
//! best-scoring candidates so the AI is not fully predictable.

use rand::rngs::ThreadRng;
use rand::{Rng, RngExt};

use crate::board::Board;
use crate::eval::{EvalWeights, Heuristic, evaluate};
use crate::lines::check_win;
use crate::moves::{Move, generate_moves};

/// Magnitude of a won or lost position.
pub const WIN_SCORE: i32 = 999_999;

/// Depth range over which [`WinScoring::DepthDiscounted`] distinguishes
/// wins.
pub const DISCOUNT_HORIZON: i32 = 10;

const INF: i32 = i32::MAX;

/// How terminal (won or lost) positions are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WinScoring {
    /// Every win is worth [`WIN_SCORE`].
    Flat,
    /// `WIN_SCORE - (DISCOUNT_HORIZON - remaining_depth)`: faster wins and
    /// slower losses score better.
    #[default]
    DepthDiscounted,
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Plies searched below each candidate move.
    pub depth: u32,
    /// Candidates kept at the root, in generation order.
    pub max_candidates: usize,
    pub win_scoring: WinScoring,
    pub heuristic: Heuristic,
    pub weights: EvalWeights,
    /// Alpha-beta cutoffs. Turning this off gives plain minimax with the
    /// same result and more nodes.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            max_candidates: 30,
            win_scoring: WinScoring::default(),
            heuristic: Heuristic::default(),
            weights: EvalWeights::default(),
            pruning: true,
        }
    }
}

/// Result of [`Searcher::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The chosen move; [`Move::INVALID`] when there was nothing to play.
    pub best: Move,
    /// Score of `best` for the side to move.
    pub score: i32,
    /// Positions visited.
    pub nodes: u64,
    /// Candidates scored at the root, after the cap.
    pub candidates: usize,
}

/// Chooses moves for the side to move of a [`Board`].
///
/// The random number generator only breaks ties between equally scored
/// candidates; seed it for reproducible play.
#[derive(Debug, Clone)]
pub struct Searcher<R: Rng> {
    config: SearchConfig,
    rng: R,
    nodes: u64,
}

impl Searcher<ThreadRng> {
    /// A searcher breaking ties with the thread-local generator.
    pub fn with_config(config: SearchConfig) -> Self {
        Self::new(config, rand::rng())
    }
}

impl<R: Rng> Searcher<R> {
    pub fn new(config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            nodes: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    /// Best move for `board.to_move()` searched to the configured depth.
    pub fn search(&mut self, board: &Board) -> SearchOutcome {
        self.search_depth(board, self.config.depth)
    }

    /// Best move searched `depth` plies below each candidate;
    /// [`Move::INVALID`] if the side to move has no legal move.
    pub fn choose_best_move(&mut self, board: &Board, depth: u32) -> Move {
        self.search_depth(board, depth).best
    }

    fn search_depth(&mut self, board: &Board, depth: u32) -> SearchOutcome {
        self.nodes = 0;
        let mut candidates = generate_moves(board);
        candidates.truncate(self.config.max_candidates);
        if candidates.is_empty() {
            log::debug!("{}: no legal moves", board.to_move());
            return SearchOutcome {
                best: Move::INVALID,
                score: 0,
                nodes: 0,
                candidates: 0,
            };
        }

        let mut best_score = -INF;
        let mut tied = Vec::new();
        for &mv in &candidates {
            let child = board.apply(mv);
            // One below the best so far: equal scores come back exact and
            // ties are real ties.
            let alpha = if self.config.pruning {
                best_score.saturating_sub(1)
            } else {
                -INF
            };
            let score = self.minimax(&child, depth, false, alpha, INF);
            log::trace!("candidate {mv} scored {score}");
            if score > best_score {
                best_score = score;
                tied.clear();
            }
            if score == best_score {
                tied.push(mv);
            }
        }

        let best = tied[self.rng.random_range(0..tied.len())];
        log::debug!(
            "{} plays {} (score {}, {} of {} candidates tied, {} nodes)",
            board.to_move(),
            best,
            best_score,
            tied.len(),
            candidates.len(),
            self.nodes
        );
        SearchOutcome {
            best,
            score: best_score,
            nodes: self.nodes,
            candidates: candidates.len(),
        }
    }

    /// Score `board` from the maximizing player's point of view.
    ///
    /// The maximizing player is the side to move when `maximizing` is set
    /// and its opponent otherwise. A decided board scores a win or loss
    /// whatever the depth; at depth zero the static evaluation applies;
    /// a side with no move scores zero.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        let me = if maximizing {
            board.to_move()
        } else {
            board.to_move().opponent()
        };

        if let Some(winner) = check_win(board) {
            let s = self.win_score(depth);
            return if winner == me { s } else { -s };
        }
        if depth == 0 {
            return evaluate(board, me, self.config.heuristic, &self.config.weights);
        }
        let moves = generate_moves(board);
        if moves.is_empty() {
            return 0;
        }

        let mut best = if maximizing { -INF } else { INF };
        for mv in moves {
            let child = board.apply(mv);
            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if self.config.pruning && beta <= alpha {
                break;
            }
        }
        best
    }

    /// Positions visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn win_score(&self, depth: u32) -> i32 {
        match self.config.win_scoring {
            WinScoring::Flat => WIN_SCORE,
            WinScoring::DepthDiscounted => {
                let remaining = depth.min(DISCOUNT_HORIZON as u32) as i32;
                WIN_SCORE - (DISCOUNT_HORIZON - remaining)
            }
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config() {
        let cfg: SearchConfig =
            serde_json::from_str(r#"{"depth": 5, "heuristic": "Threats"}"#).unwrap();
        assert_eq!(cfg.depth, 5);
        assert_eq!(cfg.heuristic, Heuristic::Threats);
        assert_eq!(cfg.max_candidates, 30);
        assert!(cfg.pruning);
    }
}
