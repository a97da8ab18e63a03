//! Board coordinates and diagonal directions.
//!
//! ```text
//!   rank
//!    7  r . r . r . r .     Red starts on ranks 5-7 and moves down.
//!    6  . r . r . r . r
//!    5  r . r . r . r .
//!    4  . . . . . . . .
//!    3  . . . . . . . .
//!    2  . w . w . w . w
//!    1  w . w . w . w .
//!    0  . w . w . w . w     White starts on ranks 0-2 and moves up.
//!       0 1 2 3 4 5 6 7  file
//! ```

use serde::{Deserialize, Serialize};

use crate::error::PositionError;
use crate::piece::Color;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: i32 = 8;

/// A validated square on the 8x8 grid.
///
/// Both coordinates are always in 0-7; construction is the only way in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    rank: u8,
    file: u8,
}

impl Position {
    /// True iff both coordinates are on the board.
    #[inline]
    pub const fn is_in_range(file: i32, rank: i32) -> bool {
        file >= 0 && file < BOARD_SIZE && rank >= 0 && rank < BOARD_SIZE
    }

    /// Create a position, failing with `OutOfRange` off the board.
    pub fn new(file: i32, rank: i32) -> Result<Position, PositionError> {
        if !Self::is_in_range(file, rank) {
            return Err(PositionError::OutOfRange { file, rank });
        }
        Ok(Position {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// File (column), 0 = A.
    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    /// Rank (row), 0 = first rank.
    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Row-major index (0-63), rank 0 first.
    #[inline]
    pub fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    /// Inverse of `index`.
    pub fn from_index(idx: usize) -> Option<Position> {
        if idx >= 64 {
            return None;
        }
        Some(Self::from_index_masked(idx))
    }

    /// Index lookup for callers that already hold an index below 64.
    #[inline]
    pub(crate) const fn from_index_masked(idx: usize) -> Position {
        Position {
            file: (idx % 8) as u8,
            rank: ((idx / 8) % 8) as u8,
        }
    }

    /// Iterate over all 64 positions in index order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..64).filter_map(Position::from_index)
    }

    /// Pieces only ever stand on dark squares.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// The neighbouring square in `dir`, or `None` at the edge.
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (df, dr) = dir.delta();
        let file = self.file as i32 + df;
        let rank = self.rank as i32 + dr;
        if !Self::is_in_range(file, rank) {
            return None;
        }
        Some(Position {
            file: file as u8,
            rank: rank as u8,
        })
    }
}

/// The four diagonal unit directions. "Up" means increasing rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// (file delta, rank delta).
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::UpLeft => (-1, 1),
            Direction::UpRight => (1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::DownRight => (1, -1),
        }
    }

    /// Whether an uncrowned piece of `color` may make a quiet move this way.
    #[inline]
    pub fn is_forward_for(self, color: Color) -> bool {
        self.delta().1 == color.forward()
    }
}
