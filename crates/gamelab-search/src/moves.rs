//! Move representation and generation.

use std::fmt;

use crate::board::Board;
use crate::piece::PieceKind;

/// A move of the piece at `(from_row, from_col)` to `(to_row, to_col)`.
///
/// Any negative coordinate makes the move invalid; [`Move::INVALID`] is what
/// the search returns when there is nothing to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from_row: i32,
    pub from_col: i32,
    pub to_row: i32,
    pub to_col: i32,
}

impl Default for Move {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Move {
    pub const INVALID: Self = Self {
        from_row: -1,
        from_col: -1,
        to_row: -1,
        to_col: -1,
    };

    pub const fn new(from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> Self {
        Self {
            from_row,
            from_col,
            to_row,
            to_col,
        }
    }

    pub fn is_valid(self) -> bool {
        self.from_row >= 0 && self.from_col >= 0 && self.to_row >= 0 && self.to_col >= 0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("(no move)");
        }
        write!(
            f,
            "({},{}) -> ({},{})",
            self.from_row, self.from_col, self.to_row, self.to_col
        )
    }
}

/// One-step orthogonal offsets as `(row, col)`.
const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// One-step diagonal offsets as `(row, col)`.
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal then diagonal steps.
const ALL_STEPS: [(i32, i32); 8] = [
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
];

/// Frog jump directions as `(row, col)`.
const JUMPS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Legal moves for the piece at `(row, col)`, whoever owns it.
///
/// Steps into empty cells come first (orthogonal, then diagonal for snakes
/// and frogs), followed by frog jumps. A jump scans outwards and lands just
/// past the first occupied cell if that landing cell is on the board and
/// empty; the scan stops at the first occupied cell either way.
pub fn piece_moves(board: &Board, row: i32, col: i32) -> Vec<Move> {
    let mut moves = Vec::new();
    push_piece_moves(board, row, col, &mut moves);
    moves
}

fn push_piece_moves(board: &Board, row: i32, col: i32, moves: &mut Vec<Move>) {
    let kind = board.get(row, col).kind();
    let steps: &[(i32, i32)] = match kind {
        PieceKind::None => return,
        PieceKind::Donkey => &ORTHOGONAL,
        PieceKind::Snake | PieceKind::Frog => &ALL_STEPS,
    };
    for &(dr, dc) in steps {
        if board.is_empty_at(row + dr, col + dc) {
            moves.push(Move::new(row, col, row + dr, col + dc));
        }
    }
    if kind != PieceKind::Frog {
        return;
    }
    for (dr, dc) in JUMPS {
        let (mut r, mut c) = (row + dr, col + dc);
        while board.contains(r, c) {
            if !board.get(r, c).is_empty() {
                if board.is_empty_at(r + dr, c + dc) {
                    moves.push(Move::new(row, col, r + dr, c + dc));
                }
                break;
            }
            r += dr;
            c += dc;
        }
    }
}

/// All legal moves for the side to move: pieces in row-major order, each
/// piece's moves in [`piece_moves`] order. Empty means stalemate.
pub fn generate_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let side = board.to_move();
    for p in board.range() {
        if board.owner(p.y, p.x) == side {
            push_piece_moves(board, p.y, p.x, &mut moves);
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Player;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    fn targets(moves: &[Move]) -> Vec<(i32, i32)> {
        moves.iter().map(|m| (m.to_row, m.to_col)).collect()
    }

    #[test]
    fn donkey_moves_orthogonally() {
        let b = board(".....\n.....\n..D..\n..s..\n.....");
        assert_eq!(
            targets(&piece_moves(&b, 2, 2)),
            vec![(2, 1), (2, 3), (1, 2)]
        );
    }

    #[test]
    fn snake_moves_in_eight_directions() {
        let b = board("S....\n.....\n.....\n.....\n.....");
        assert_eq!(targets(&piece_moves(&b, 0, 0)), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn frog_jumps_the_first_piece() {
        let b = board(".....\n.....\n..Fd.\n.....\n.....");
        let moves = piece_moves(&b, 2, 2);
        assert!(moves.contains(&Move::new(2, 2, 2, 4)));
        assert!(!moves.contains(&Move::new(2, 2, 2, 5)));
        // Eight steps minus the occupied one, plus the jump.
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.last(), Some(&Move::new(2, 2, 2, 4)));
    }

    #[test]
    fn frog_cannot_jump_onto_a_piece_or_off_board() {
        let blocked = board(".....\n.....\n..Fdd\n.....\n.....");
        assert!(!piece_moves(&blocked, 2, 2).contains(&Move::new(2, 2, 2, 4)));

        let edge = board(".....\n.....\n...Fd\n.....\n.....");
        assert!(piece_moves(&edge, 2, 3).iter().all(|m| m.to_col < 5));
    }

    #[test]
    fn frog_jumps_only_the_first_piece_in_a_line() {
        let b = board("F.D.d\n.....\n.....\n.....\n.....");
        let moves = piece_moves(&b, 0, 0);
        assert!(moves.contains(&Move::new(0, 0, 0, 3)));
        assert!(!moves.contains(&Move::new(0, 0, 0, 5)));
        assert_eq!(
            moves.iter().filter(|m| m.to_row == 0 && m.to_col > 1).count(),
            1
        );
    }

    #[test]
    fn frog_jumps_over_distant_pieces() {
        let b = board("F....\n.....\n.....\n...d.\n.....");
        assert!(piece_moves(&b, 0, 0).contains(&Move::new(0, 0, 4, 4)));
    }

    #[test]
    fn empty_cells_have_no_moves() {
        let b = Board::default();
        assert!(piece_moves(&b, 2, 2).is_empty());
        assert!(piece_moves(&b, -1, 7).is_empty());
    }

    #[test]
    fn generate_moves_for_side_to_move_only() {
        let mut b = board("D....\n.....\n.....\n.....\n....d");
        let ones = generate_moves(&b);
        assert_eq!(targets(&ones), vec![(0, 1), (1, 0)]);
        b.set_to_move(Player::Two);
        let twos = generate_moves(&b);
        assert_eq!(targets(&twos), vec![(4, 3), (3, 4)]);
        assert!(twos.iter().all(|m| (m.from_row, m.from_col) == (4, 4)));
    }

    #[test]
    fn boxed_in_side_has_no_moves() {
        let b = board("Dd...\ndd...\n.....\n.....\n.....");
        assert!(generate_moves(&b).is_empty());
    }

    #[test]
    fn invalid_sentinel() {
        assert!(!Move::INVALID.is_valid());
        assert!(!Move::new(0, 0, -1, 2).is_valid());
        assert!(Move::new(0, 0, 0, 1).is_valid());
        assert_eq!(Move::default(), Move::INVALID);
        assert_eq!(Move::INVALID.to_string(), "(no move)");
    }
}
