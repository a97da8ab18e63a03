//! Legal destination generation for a single piece.
//!
//! Each of the four diagonals is scanned outward from the piece:
//!
//! ```text
//!   off board            -> stop
//!   empty                -> Normal (kings: any way; men: forward only)
//!                           men stop here, kings keep sliding
//!   own piece            -> stop
//!   enemy, beyond empty  -> Jump to the square beyond, capturing the enemy;
//!                           kings keep scanning from the landing square
//!   enemy, beyond not    -> stop
//! ```
//!
//! After a king has captured in a direction, every further empty square on
//! that line is also a Jump destination and carries all captures made so far
//! on the line (a long king jump takes everything it passes over).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::board::Board;
use crate::position::{Direction, Position};

/// Whether a destination is a quiet move or a capture.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Normal,
    Jump,
}

/// A legal destination: its kind and, for jumps, the squares captured in
/// the order they are passed over.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct LegalMove {
    pub kind: MoveKind,
    pub captures: Vec<Position>,
}

impl LegalMove {
    fn normal() -> LegalMove {
        LegalMove {
            kind: MoveKind::Normal,
            captures: Vec::new(),
        }
    }

    fn jump(captures: Vec<Position>) -> LegalMove {
        LegalMove {
            kind: MoveKind::Jump,
            captures,
        }
    }

    #[inline]
    pub fn is_jump(&self) -> bool {
        self.kind == MoveKind::Jump
    }
}

/// Destination -> move, ordered by square for stable output.
pub type MoveMap = BTreeMap<Position, LegalMove>;

/// Computes legal destinations against a borrowed board. Never fails.
pub struct MoveGenerator<'a> {
    board: &'a Board,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// All legal destinations for the piece on `from`; empty if the square
    /// is empty or the piece is stuck.
    pub fn moves_from(&self, from: Position) -> MoveMap {
        let mut moves = MoveMap::new();
        let Some(piece) = self.board.piece_at(from) else {
            return moves;
        };

        for dir in Direction::ALL {
            let mut captures: Vec<Position> = Vec::new();
            let mut cursor = from;

            while let Some(next) = cursor.step(dir) {
                match self.board.piece_at(next) {
                    None => {
                        if !captures.is_empty() {
                            record(&mut moves, next, LegalMove::jump(captures.clone()));
                        } else if piece.is_king() || dir.is_forward_for(piece.color) {
                            record(&mut moves, next, LegalMove::normal());
                        }
                        if !piece.is_king() {
                            break;
                        }
                        cursor = next;
                    }
                    Some(other) if other.color == piece.color => break,
                    Some(_) => {
                        let Some(landing) = next.step(dir) else {
                            break;
                        };
                        if !self.board.is_empty(landing) {
                            break;
                        }
                        captures.push(next);
                        record(&mut moves, landing, LegalMove::jump(captures.clone()));
                        if !piece.is_king() {
                            break;
                        }
                        cursor = landing;
                    }
                }
            }
        }

        moves
    }

    /// Only the capturing destinations for the piece on `from`.
    pub fn jumps_from(&self, from: Position) -> MoveMap {
        let mut moves = self.moves_from(from);
        moves.retain(|_, mv| mv.is_jump());
        moves
    }
}

/// Insert a destination, never downgrading a Jump to a Normal.
fn record(moves: &mut MoveMap, to: Position, mv: LegalMove) {
    match moves.get(&to) {
        Some(existing) if existing.is_jump() && !mv.is_jump() => {}
        _ => {
            moves.insert(to, mv);
        }
    }
}
