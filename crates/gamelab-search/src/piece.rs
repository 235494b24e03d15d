//! Players and pieces.

use std::fmt;

/// Board side. [`Player::None`] owns empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    #[default]
    None,
    One,
    Two,
}

impl Player {
    /// The other side. `None` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
            Self::None => Self::None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "nobody",
            Self::One => "player one",
            Self::Two => "player two",
        })
    }
}

/// Animal kinds. Each kind has its own movement rule, see
/// [`piece_moves`](crate::piece_moves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    #[default]
    None,
    /// Moves one step in any direction or jumps over the first piece in
    /// any direction.
    Frog,
    /// Moves one step in any direction.
    Snake,
    /// Moves one step orthogonally.
    Donkey,
}

impl PieceKind {
    /// Upper-case glyph used in board text; Player Two uses lower case.
    pub fn glyph(self) -> char {
        match self {
            Self::None => '.',
            Self::Frog => 'F',
            Self::Snake => 'S',
            Self::Donkey => 'D',
        }
    }
}

/// The content of one board cell, stripped of anything but what the search
/// needs.
///
/// The owner is [`Player::None`] exactly when the kind is
/// [`PieceKind::None`]; [`PieceState::new`] collapses anything else to
/// [`PieceState::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "(Player, PieceKind)", into = "(Player, PieceKind)")
)]
pub struct PieceState {
    owner: Player,
    kind: PieceKind,
}

impl PieceState {
    pub const EMPTY: Self = Self {
        owner: Player::None,
        kind: PieceKind::None,
    };

    pub fn new(owner: Player, kind: PieceKind) -> Self {
        if owner == Player::None || kind == PieceKind::None {
            return Self::EMPTY;
        }
        Self { owner, kind }
    }

    pub fn owner(self) -> Player {
        self.owner
    }

    pub fn kind(self) -> PieceKind {
        self.kind
    }

    pub fn is_empty(self) -> bool {
        self.kind == PieceKind::None
    }

    /// Board text glyph.
    pub fn glyph(self) -> char {
        let c = self.kind.glyph();
        if self.owner == Player::Two {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub fn from_glyph(ch: char) -> Option<Self> {
        let owner = if ch.is_ascii_lowercase() {
            Player::Two
        } else {
            Player::One
        };
        let kind = match ch.to_ascii_uppercase() {
            '.' => return Some(Self::EMPTY),
            'F' => PieceKind::Frog,
            'S' => PieceKind::Snake,
            'D' => PieceKind::Donkey,
            _ => return None,
        };
        Some(Self::new(owner, kind))
    }
}

impl From<(Player, PieceKind)> for PieceState {
    fn from((owner, kind): (Player, PieceKind)) -> Self {
        Self::new(owner, kind)
    }
}

impl From<PieceState> for (Player, PieceKind) {
    fn from(p: PieceState) -> Self {
        (p.owner, p.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_empty_pieces_collapse() {
        assert_eq!(PieceState::new(Player::One, PieceKind::None), PieceState::EMPTY);
        assert_eq!(PieceState::new(Player::None, PieceKind::Frog), PieceState::EMPTY);
        let p = PieceState::new(Player::Two, PieceKind::Snake);
        assert_eq!(p.owner(), Player::Two);
        assert_eq!(p.kind(), PieceKind::Snake);
        assert!(!p.is_empty());
    }

    #[test]
    fn glyphs() {
        for ch in ['.', 'F', 'S', 'D', 'f', 's', 'd'] {
            let p = PieceState::from_glyph(ch).unwrap();
            assert_eq!(p.glyph(), ch);
        }
        assert_eq!(PieceState::from_glyph('x'), None);
        assert_eq!(
            PieceState::from_glyph('d'),
            Some(PieceState::new(Player::Two, PieceKind::Donkey))
        );
    }

    #[test]
    fn projection_both_ways() {
        let p: PieceState = (Player::One, PieceKind::Frog).into();
        let back: (Player, PieceKind) = p.into();
        assert_eq!(back, (Player::One, PieceKind::Frog));
        let empty: (Player, PieceKind) = PieceState::from((Player::One, PieceKind::None)).into();
        assert_eq!(empty, (Player::None, PieceKind::None));
    }

    #[test]
    fn opponents() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::None.opponent(), Player::None);
    }
}
