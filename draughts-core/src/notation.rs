//! Conventional square names ("A1".."H8") and move notation ("B3-A4", "B3xD5").
//!
//! Only boundary code (CLI, HTTP, WASM) needs these; the rules work on
//! `Position` values directly.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::movegen::MoveKind;
use crate::position::Position;

/// Encode a position as file letter + rank digit, e.g. `B3`.
pub fn encode(pos: Position) -> String {
    let file = (b'A' + pos.file()) as char;
    let rank = (b'1' + pos.rank()) as char;
    format!("{file}{rank}")
}

/// Decode `A1`..`H8`; the file letter may be lower case.
pub fn decode(s: &str) -> Result<Position, NotationError> {
    let mut chars = s.trim().chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(NotationError::BadLength(s.to_string()));
    };

    let file_idx = match file.to_ascii_uppercase() {
        c @ 'A'..='H' => c as i32 - 'A' as i32,
        _ => return Err(NotationError::BadFile(file)),
    };
    let rank_idx = match rank {
        c @ '1'..='8' => c as i32 - '1' as i32,
        _ => return Err(NotationError::BadRank(rank)),
    };

    // Both indices were checked above, so this cannot be out of range.
    Position::new(file_idx, rank_idx).map_err(|_| NotationError::BadLength(s.to_string()))
}

/// Parse `B3-A4`, `B3xD5` or `B3 A4` into (from, to).
pub fn parse_move(s: &str) -> Result<(Position, Position), NotationError> {
    let s = s.trim();
    let parts: Vec<&str> = s
        .split(|c: char| c == '-' || c == 'x' || c == 'X' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [from, to] => Ok((decode(from)?, decode(to)?)),
        _ => Err(NotationError::BadMove(s.to_string())),
    }
}

/// Format a move, using `x` for captures and `-` otherwise.
pub fn format_move(from: Position, to: Position, kind: MoveKind) -> String {
    let sep = match kind {
        MoveKind::Normal => '-',
        MoveKind::Jump => 'x',
    };
    format!("{}{}{}", encode(from), sep, encode(to))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(*self))
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl TryFrom<String> for Position {
    type Error = NotationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        decode(&s)
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> String {
        encode(pos)
    }
}
