//! Four-cell lines and win detection.

use crate::board::Board;
use crate::piece::Player;

/// Pieces in a row needed to win.
pub const LINE_LEN: i32 = 4;

/// A run of [`LINE_LEN`] cells starting at `(row, col)` and stepping by
/// `(d_row, d_col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub row: i32,
    pub col: i32,
    pub d_row: i32,
    pub d_col: i32,
}

impl Line {
    const fn new(row: i32, col: i32, d_row: i32, d_col: i32) -> Self {
        Self {
            row,
            col,
            d_row,
            d_col,
        }
    }

    /// The `(row, col)` coordinates of the line's cells.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0..LINE_LEN).map(move |i| (self.row + i * self.d_row, self.col + i * self.d_col))
    }

    /// Owners of the line's cells on `board`.
    pub fn owners(self, board: &Board) -> [Player; LINE_LEN as usize] {
        let mut out = [Player::None; LINE_LEN as usize];
        for (slot, (r, c)) in out.iter_mut().zip(self.cells()) {
            *slot = board.owner(r, c);
        }
        out
    }
}

/// Every line on a `size × size` board, in scan order: horizontal, vertical,
/// down-right diagonals, then up-right diagonals.
pub fn lines(size: i32) -> impl Iterator<Item = Line> {
    let anchors = (size - LINE_LEN + 1).max(0);
    let span = move |n: i32| 0..n.max(0);

    let horizontal =
        span(size).flat_map(move |row| span(anchors).map(move |col| Line::new(row, col, 0, 1)));
    let vertical =
        span(size).flat_map(move |col| span(anchors).map(move |row| Line::new(row, col, 1, 0)));
    let down_right =
        span(anchors).flat_map(move |row| span(anchors).map(move |col| Line::new(row, col, 1, 1)));
    let up_right = (LINE_LEN - 1..size)
        .flat_map(move |row| span(anchors).map(move |col| Line::new(row, col, -1, 1)));

    horizontal.chain(vertical).chain(down_right).chain(up_right)
}

/// The owner of the first complete line found, scanning in [`lines`] order.
pub fn check_win(board: &Board) -> Option<Player> {
    lines(board.size()).find_map(|line| {
        let owners = line.owners(board);
        let first = owners[0];
        (first != Player::None && owners.iter().all(|&o| o == first)).then_some(first)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{PieceKind, PieceState};

    #[test]
    fn line_counts() {
        // 5×5: 10 horizontal, 10 vertical, 4 + 4 diagonal.
        assert_eq!(lines(5).count(), 28);
        assert_eq!(lines(4).count(), 10);
        assert_eq!(lines(3).count(), 0);
    }

    #[test]
    fn lines_stay_on_the_board() {
        for line in lines(6) {
            for (r, c) in line.cells() {
                assert!((0..6).contains(&r) && (0..6).contains(&c), "{line:?}");
            }
        }
    }

    #[test]
    fn up_right_diagonal_cells() {
        let last = lines(4).last().unwrap();
        assert_eq!(
            last.cells().collect::<Vec<_>>(),
            vec![(3, 0), (2, 1), (1, 2), (0, 3)]
        );
    }

    #[test]
    fn top_row_of_four_wins() {
        let b: Board = "DDDD.\n.....\n.....\n.....\n.....".parse().unwrap();
        assert_eq!(check_win(&b), Some(Player::One));
        for col in 0..4 {
            let mut missing = b.clone();
            missing.set(0, col, PieceState::EMPTY);
            assert_eq!(check_win(&missing), None, "without column {col}");
        }
    }

    #[test]
    fn mixed_kinds_count_by_owner() {
        let b: Board = "....f\n...s.\n..d..\n.f...\n.....".parse().unwrap();
        assert_eq!(check_win(&b), Some(Player::Two));
    }

    #[test]
    fn mixed_owners_do_not_win() {
        let mut b: Board = ".....\nFSDd.\n.....\n.....\n.....".parse().unwrap();
        assert_eq!(check_win(&b), None);
        b.set(1, 3, PieceState::new(Player::One, PieceKind::Donkey));
        assert_eq!(check_win(&b), Some(Player::One));
    }

    #[test]
    fn vertical_and_diagonal_wins() {
        let v: Board = ".....\n.s...\n.s...\n.s...\n.s...".parse().unwrap();
        assert_eq!(check_win(&v), Some(Player::Two));
        let d: Board = ".....\n.D...\n..D..\n...D.\n....D".parse().unwrap();
        assert_eq!(check_win(&d), Some(Player::One));
    }

    #[test]
    fn horizontal_is_reported_before_vertical() {
        let b: Board = "d....\nd....\nd....\ndFFFF\n.....".parse().unwrap();
        assert_eq!(check_win(&b), Some(Player::One));
    }
}
