//! Player colors and pieces.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two sides.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Red];

    /// Get the opponent color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Red,
            Color::Red => Color::White,
        }
    }

    /// Rank delta of a forward step: White advances up, Red down.
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Red => -1,
        }
    }

    /// The farthest rank from this color's side, where its men are crowned.
    #[inline]
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Red => 0,
        }
    }

    /// Ranks a color occupies in the starting position.
    pub fn home_ranks(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Color::White => 0..=2,
            Color::Red => 5..=7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Red => write!(f, "red"),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "red" | "r" => Ok(Color::Red),
            other => Err(format!("unknown color {other:?}, expected white or red")),
        }
    }
}

/// A single draughts piece: a color and a king flag.
///
/// Where the piece stands is tracked by the board's arena, not here.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    king: bool,
}

impl Piece {
    /// An uncrowned piece.
    #[inline]
    pub const fn man(color: Color) -> Piece {
        Piece { color, king: false }
    }

    /// A crowned piece.
    #[inline]
    pub const fn king(color: Color) -> Piece {
        Piece { color, king: true }
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.king
    }

    /// Crown the piece. Returns true only the first time; kings stay kings.
    pub fn crown(&mut self) -> bool {
        let promoted = !self.king;
        self.king = true;
        promoted
    }

    /// Single-character glyph used by text renderers.
    pub fn glyph(self) -> char {
        match (self.color, self.king) {
            (Color::White, false) => 'w',
            (Color::White, true) => 'W',
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
        }
    }
}
