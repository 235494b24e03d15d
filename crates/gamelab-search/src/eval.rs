//! Static board evaluation.

use crate::board::Board;
use crate::lines::lines;
use crate::piece::Player;

/// Which static evaluation the search uses at its horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// Piece count plus centre control.
    #[default]
    Material,
    /// [`Material`](Self::Material) plus open three- and two-in-a-row
    /// patterns.
    Threats,
}

/// Evaluation constants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalWeights {
    /// Per piece on the board.
    pub piece: i32,
    /// Extra per piece in the central 3×3.
    pub center: i32,
    /// Line with three own pieces and one empty cell.
    pub own_three: i32,
    /// Line with three opposing pieces and one empty cell.
    pub opponent_three: i32,
    /// Line with two own pieces and two empty cells.
    pub own_two: i32,
    /// Line with two opposing pieces and two empty cells.
    pub opponent_two: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            piece: 10,
            center: 5,
            own_three: 100,
            opponent_three: 90,
            own_two: 30,
            opponent_two: 25,
        }
    }
}

/// Score `board` from `player`'s point of view; positive is good for
/// `player`.
pub fn evaluate(board: &Board, player: Player, heuristic: Heuristic, w: &EvalWeights) -> i32 {
    let score = material(board, player, w);
    match heuristic {
        Heuristic::Material => score,
        Heuristic::Threats => score + threats(board, player, w),
    }
}

/// Piece count and centre control: `±piece` per piece, `±center` more
/// inside the central 3×3.
pub fn material(board: &Board, player: Player, w: &EvalWeights) -> i32 {
    let mid = board.size() / 2;
    let mut score = 0;
    for p in board.range() {
        let owner = board.owner(p.y, p.x);
        if owner == Player::None {
            continue;
        }
        let mut value = w.piece;
        if (p.y - mid).abs() <= 1 && (p.x - mid).abs() <= 1 {
            value += w.center;
        }
        score += if owner == player { value } else { -value };
    }
    score
}

/// Open line patterns over every four-cell line.
pub fn threats(board: &Board, player: Player, w: &EvalWeights) -> i32 {
    let opponent = player.opponent();
    let mut score = 0;
    for line in lines(board.size()) {
        let owners = line.owners(board);
        let empty = owners.iter().filter(|&&o| o == Player::None).count();
        let own = owners.iter().filter(|&&o| o == player).count();
        let theirs = owners.iter().filter(|&&o| o == opponent).count();
        score += match (own, theirs, empty) {
            (3, _, 1) => w.own_three,
            (2, _, 2) => w.own_two,
            (_, 3, 1) => -w.opponent_three,
            (_, 2, 2) => -w.opponent_two,
            _ => 0,
        };
    }
    score
}
