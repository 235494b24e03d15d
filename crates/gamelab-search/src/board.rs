//! The search-side board snapshot.

use std::fmt;
use std::str::FromStr;

use gamelab_core::{Point, Range};

use crate::moves::Move;
use crate::piece::{PieceKind, PieceState, Player};

/// Side length of the lab board.
pub const DEFAULT_SIZE: i32 = 5;

/// Pieces each player starts with, in placement order.
pub const ROSTER: [PieceKind; 5] = [
    PieceKind::Frog,
    PieceKind::Snake,
    PieceKind::Donkey,
    PieceKind::Donkey,
    PieceKind::Donkey,
];

/// Anything that can be projected into a [`Board`]: typically the live,
/// rendered board of the host game.
pub trait PieceSource {
    /// Side length of the square board.
    fn size(&self) -> i32;

    /// Piece at `(row, col)`; only called for in-range coordinates.
    fn piece_at(&self, row: i32, col: i32) -> PieceState;
}

/// Errors that can occur when parsing board text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No rows at all.
    Empty,
    /// The board is not square: row `row` has `found` cells, `expected`
    /// were needed.
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character that is not a piece glyph.
    InvalidChar { ch: char, row: usize, col: usize },
    /// Stored cells do not cover a `size × size` board.
    CellCount { size: i32, found: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("board: no rows"),
            Self::NotSquare {
                row,
                expected,
                found,
            } => write!(f, "board: row {row} has {found} cells, expected {expected}"),
            Self::InvalidChar { ch, row, col } => {
                write!(f, "board: invalid character {ch:?} at row {row}, column {col}")
            }
            Self::CellCount { size, found } => {
                write!(f, "board: {found} cells do not fill a {size}×{size} board")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A square board of [`PieceState`]s plus the side to move.
///
/// Boards are plain values: the search clones one per node and never shares
/// them mutably.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "BoardData"))]
pub struct Board {
    size: i32,
    cells: Vec<PieceState>,
    to_move: Player,
}

/// Unchecked board fields as they arrive from a deserializer.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoardData {
    size: i32,
    cells: Vec<PieceState>,
    to_move: Player,
}

#[cfg(feature = "serde")]
impl TryFrom<BoardData> for Board {
    type Error = BoardError;

    fn try_from(data: BoardData) -> Result<Self, BoardError> {
        let fits = data.size >= 1
            && usize::try_from(data.size)
                .ok()
                .and_then(|n| n.checked_mul(n))
                == Some(data.cells.len());
        if !fits {
            return Err(BoardError::CellCount {
                size: data.size,
                found: data.cells.len(),
            });
        }
        Ok(Self {
            size: data.size,
            cells: data.cells,
            to_move: data.to_move,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_SIZE, Player::One)
    }
}

impl Board {
    /// An empty `size × size` board. Sizes below 1 are raised to 1.
    pub fn empty(size: i32, to_move: Player) -> Self {
        let size = size.max(1);
        Self {
            size,
            cells: vec![PieceState::EMPTY; (size * size) as usize],
            to_move,
        }
    }

    /// The starting position, Player One to move.
    ///
    /// Each roster fills two staggered rows on its own side: even columns of
    /// the home row first, then odd columns of the row in front of it, so no
    /// side starts with pieces in a line. Player One holds rows 0 and 1,
    /// Player Two the last two rows. On boards smaller than four no line can
    /// form and each roster takes the home row only. Rosters are cut short
    /// when the slots run out.
    pub fn opening(size: i32) -> Self {
        let mut b = Self::empty(size, Player::One);
        let last = b.size - 1;
        for (slot, kind) in opening_slots(b.size).zip(ROSTER) {
            b.set(slot.y, slot.x, PieceState::new(Player::One, kind));
            if last - slot.y != slot.y {
                b.set(last - slot.y, slot.x, PieceState::new(Player::Two, kind));
            }
        }
        b
    }

    /// Copy a live board into a search snapshot.
    pub fn snapshot<S: PieceSource + ?Sized>(source: &S, to_move: Player) -> Self {
        let mut b = Self::empty(source.size(), to_move);
        for p in b.range() {
            b.set(p.y, p.x, source.piece_at(p.y, p.x));
        }
        b
    }

    /// Parse board text: one row per line, see [`PieceState::glyph`].
    ///
    /// Whitespace around the whole text and around each line is ignored.
    pub fn parse(text: &str, to_move: Player) -> Result<Self, BoardError> {
        let rows: Vec<&str> = text.trim().lines().map(str::trim).collect();
        let size = rows.len();
        if size == 0 || rows[0].is_empty() {
            return Err(BoardError::Empty);
        }
        let mut b = Self::empty(size as i32, to_move);
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(BoardError::NotSquare {
                    row,
                    expected: size,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let piece =
                    PieceState::from_glyph(ch).ok_or(BoardError::InvalidChar { ch, row, col })?;
                b.set(row as i32, col as i32, piece);
            }
        }
        Ok(b)
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// The board as a grid range, `x` being the column and `y` the row.
    pub fn range(&self) -> Range {
        Range::with_size(self.size, self.size)
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn set_to_move(&mut self, player: Player) {
        self.to_move = player;
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.range().contains(Point::new(col, row))
    }

    /// Piece at `(row, col)`; empty outside the board.
    pub fn get(&self, row: i32, col: i32) -> PieceState {
        self.range()
            .index(Point::new(col, row))
            .map_or(PieceState::EMPTY, |i| self.cells[i])
    }

    /// Owner of `(row, col)`; [`Player::None`] outside the board.
    pub fn owner(&self, row: i32, col: i32) -> Player {
        self.get(row, col).owner()
    }

    pub fn is_empty_at(&self, row: i32, col: i32) -> bool {
        self.contains(row, col) && self.get(row, col).is_empty()
    }

    /// Set `(row, col)`. Returns false, changing nothing, outside the board.
    pub fn set(&mut self, row: i32, col: i32, piece: PieceState) -> bool {
        match self.range().index(Point::new(col, row)) {
            Some(i) => {
                self.cells[i] = piece;
                true
            }
            None => false,
        }
    }

    /// Number of pieces owned by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|p| p.owner() == player).count()
    }

    /// The board after `mv`, with the other side to move.
    ///
    /// The move is not checked for legality; an invalid or out-of-range
    /// move only switches the side to move.
    pub fn apply(&self, mv: Move) -> Self {
        let mut next = self.clone();
        if mv.is_valid() && self.contains(mv.from_row, mv.from_col) {
            let piece = self.get(mv.from_row, mv.from_col);
            if next.set(mv.to_row, mv.to_col, piece) {
                next.set(mv.from_row, mv.from_col, PieceState::EMPTY);
            }
        }
        next.to_move = self.to_move.opponent();
        next
    }
}

/// Player One's starting cells as `Point { x: col, y: row }`, in roster
/// order.
fn opening_slots(size: i32) -> impl Iterator<Item = Point> {
    let staggered = size >= crate::lines::LINE_LEN;
    let home = (0..size).step_by(if staggered { 2 } else { 1 }).map(|col| Point::new(col, 0));
    let front = (1..size)
        .step_by(2)
        .filter(move |_| staggered)
        .map(|col| Point::new(col, 1));
    home.chain(front)
}

impl PieceSource for Board {
    fn size(&self) -> i32 {
        self.size
    }

    fn piece_at(&self, row: i32, col: i32) -> PieceState {
        self.get(row, col)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse with Player One to move.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Player::One)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.get(row, col).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
