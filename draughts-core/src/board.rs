//! Square grid plus the piece arena.
//!
//! Squares and pieces live in two fixed-size arrays and refer to each other
//! by index: a square records the `PieceId` standing on it, and each arena
//! slot records the `Position` its piece stands on. The arena owns the
//! pieces; both cross-references are plain lookups.
//!
//! `place` and `remove` are the only square mutators. Moves and captures are
//! expressed as remove-then-place pairs plus arena bookkeeping, so a square
//! never holds two pieces, even transiently.

use std::fmt;

use crate::error::BoardError;
use crate::piece::{Color, Piece};
use crate::position::Position;

/// Capacity of the arena: 12 pieces per side.
pub const MAX_PIECES: usize = 24;

/// Stable handle to a piece in the arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One cell of the grid. Knows its own position for its whole life.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Square {
    position: Position,
    occupant: Option<PieceId>,
}

impl Square {
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Slot {
    piece: Piece,
    at: Position,
}

/// The 64 squares and the pieces standing on them.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [Square; 64],
    pieces: [Option<Slot>; MAX_PIECES],
}

impl Board {
    /// An empty board.
    pub fn new() -> Board {
        Board {
            squares: std::array::from_fn(|i| Square {
                position: Position::from_index_masked(i),
                occupant: None,
            }),
            pieces: [None; MAX_PIECES],
        }
    }

    /// The standard opening: 12 men per side on the dark squares of their
    /// three home ranks, the two middle ranks empty.
    pub fn standard() -> Board {
        let mut board = Board::new();
        let mut next = 0;
        for pos in Position::all().filter(|p| p.is_dark()) {
            let color = Color::ALL
                .into_iter()
                .find(|c| c.home_ranks().contains(&pos.rank()));
            if let Some(color) = color {
                board.pieces[next] = Some(Slot {
                    piece: Piece::man(color),
                    at: pos,
                });
                board.squares[pos.index()].occupant = Some(PieceId(next as u8));
                next += 1;
            }
        }
        board
    }

    // ========== Square access ==========

    /// Every position has exactly one square.
    #[inline]
    pub fn square_at(&self, pos: Position) -> &Square {
        &self.squares[pos.index()]
    }

    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        self.square_at(pos).is_empty()
    }

    #[inline]
    pub fn occupant(&self, pos: Position) -> Option<PieceId> {
        self.square_at(pos).occupant
    }

    /// The piece standing on `pos`, if any.
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.occupant(pos).and_then(|id| self.piece(id))
    }

    /// Put `id` on an empty square.
    pub fn place(&mut self, pos: Position, id: PieceId) -> Result<(), BoardError> {
        let square = &mut self.squares[pos.index()];
        if square.occupant.is_some() {
            return Err(BoardError::OccupiedSquare(pos));
        }
        square.occupant = Some(id);
        Ok(())
    }

    /// Clear an occupied square, returning whoever stood there.
    pub fn remove(&mut self, pos: Position) -> Result<PieceId, BoardError> {
        self.squares[pos.index()]
            .occupant
            .take()
            .ok_or(BoardError::AlreadyEmpty(pos))
    }

    // ========== Arena ==========

    /// Look up a live piece.
    pub fn piece(&self, id: PieceId) -> Option<Piece> {
        self.slot(id).map(|slot| slot.piece)
    }

    /// Where a live piece stands.
    pub fn position_of(&self, id: PieceId) -> Option<Position> {
        self.slot(id).map(|slot| slot.at)
    }

    fn slot(&self, id: PieceId) -> Option<&Slot> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    /// Create a piece on an empty square.
    pub fn add_piece(&mut self, pos: Position, piece: Piece) -> Result<PieceId, BoardError> {
        let free = self
            .pieces
            .iter()
            .position(Option::is_none)
            .ok_or(BoardError::ArenaFull)?;
        let id = PieceId(free as u8);
        self.place(pos, id)?;
        self.pieces[free] = Some(Slot { piece, at: pos });
        Ok(id)
    }

    /// Move a live piece to an empty square.
    pub fn relocate(&mut self, id: PieceId, to: Position) -> Result<(), BoardError> {
        let from = self.position_of(id).ok_or(BoardError::AlreadyEmpty(to))?;
        if !self.is_empty(to) {
            return Err(BoardError::OccupiedSquare(to));
        }
        self.remove(from)?;
        self.place(to, id)?;
        if let Some(slot) = self.pieces[id.index()].as_mut() {
            slot.at = to;
        }
        Ok(())
    }

    /// Take the piece on `pos` off the board for good.
    ///
    /// The square is cleared before the arena slot is dropped, so nothing is
    /// left pointing at a dead piece.
    pub fn capture(&mut self, pos: Position) -> Result<Piece, BoardError> {
        let id = self.remove(pos)?;
        self.pieces[id.index()]
            .take()
            .map(|slot| slot.piece)
            .ok_or(BoardError::AlreadyEmpty(pos))
    }

    /// Crown a piece. Returns true only when it was not already a king.
    pub fn crown(&mut self, id: PieceId) -> bool {
        self.pieces[id.index()]
            .as_mut()
            .map(|slot| slot.piece.crown())
            .unwrap_or(false)
    }

    /// All live pieces in arena order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, Position, Piece)> + '_ {
        self.pieces.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|slot| (PieceId(i as u8), slot.at, slot.piece))
        })
    }

    /// Number of live pieces of `color`.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, _, p)| p.color == color).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// ASCII diagram, rank 8 on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let pos = Position::from_index_masked(rank as usize * 8 + file as usize);
                let c = match self.piece_at(pos) {
                    Some(piece) => piece.glyph(),
                    None if pos.is_dark() => '.',
                    None => ' ',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   A B C D E F G H")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(file: i32, rank: i32) -> Position {
        Position::new(file, rank).unwrap()
    }

    /// Every square reference agrees with its arena slot and vice versa.
    fn assert_consistent(board: &Board) {
        for (id, at, _) in board.pieces() {
            assert_eq!(board.occupant(at), Some(id));
        }
        for p in Position::all() {
            if let Some(id) = board.occupant(p) {
                assert_eq!(board.position_of(id), Some(p));
            }
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(Position::all().all(|p| board.is_empty(p)));
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn test_squares_know_their_position() {
        let board = Board::standard();
        for p in Position::all() {
            assert_eq!(board.square_at(p).position(), p);
        }
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.count(Color::White), 12);
        assert_eq!(board.count(Color::Red), 12);
        for (_, at, piece) in board.pieces() {
            assert!(at.is_dark());
            assert!(at.rank() != 3 && at.rank() != 4);
            assert!(piece.color.home_ranks().contains(&at.rank()));
            assert!(!piece.is_king());
        }
        assert_eq!(board.piece_at(pos(1, 2)), Some(Piece::man(Color::White)));
        assert_eq!(board.piece_at(pos(0, 5)), Some(Piece::man(Color::Red)));
        assert_consistent(&board);
    }

    #[test]
    fn test_place_occupied_fails() {
        let mut board = Board::new();
        let id = board.add_piece(pos(1, 0), Piece::man(Color::White)).unwrap();
        assert_eq!(
            board.place(pos(1, 0), id),
            Err(BoardError::OccupiedSquare(pos(1, 0)))
        );
    }

    #[test]
    fn test_remove_empty_fails() {
        let mut board = Board::new();
        assert_eq!(
            board.remove(pos(3, 4)),
            Err(BoardError::AlreadyEmpty(pos(3, 4)))
        );
    }

    #[test]
    fn test_add_piece_on_occupied_square_leaves_arena_untouched() {
        let mut board = Board::new();
        board.add_piece(pos(1, 0), Piece::man(Color::White)).unwrap();
        assert!(board.add_piece(pos(1, 0), Piece::man(Color::Red)).is_err());
        assert_eq!(board.pieces().count(), 1);
        assert_consistent(&board);
    }

    #[test]
    fn test_arena_full() {
        let mut board = Board::standard();
        assert_eq!(
            board.add_piece(pos(0, 3), Piece::man(Color::White)),
            Err(BoardError::ArenaFull)
        );
    }

    #[test]
    fn test_relocate_updates_both_sides() {
        let mut board = Board::standard();
        let id = board.occupant(pos(1, 2)).unwrap();
        board.relocate(id, pos(0, 3)).unwrap();
        assert!(board.is_empty(pos(1, 2)));
        assert_eq!(board.occupant(pos(0, 3)), Some(id));
        assert_eq!(board.position_of(id), Some(pos(0, 3)));
        assert_consistent(&board);
    }

    #[test]
    fn test_relocate_onto_piece_fails_without_moving() {
        let mut board = Board::standard();
        let id = board.occupant(pos(1, 2)).unwrap();
        assert_eq!(
            board.relocate(id, pos(0, 1)),
            Err(BoardError::OccupiedSquare(pos(0, 1)))
        );
        assert_eq!(board.position_of(id), Some(pos(1, 2)));
        assert_consistent(&board);
    }

    #[test]
    fn test_capture_removes_piece_and_frees_slot() {
        let mut board = Board::standard();
        let id = board.occupant(pos(0, 5)).unwrap();
        assert_eq!(board.capture(pos(0, 5)), Ok(Piece::man(Color::Red)));
        assert!(board.is_empty(pos(0, 5)));
        assert_eq!(board.piece(id), None);
        assert_eq!(board.count(Color::Red), 11);
        assert_eq!(
            board.capture(pos(0, 5)),
            Err(BoardError::AlreadyEmpty(pos(0, 5)))
        );

        // The freed slot is reused.
        let new_id = board.add_piece(pos(0, 3), Piece::king(Color::Red)).unwrap();
        assert_eq!(new_id, id);
        assert_consistent(&board);
    }

    #[test]
    fn test_crown() {
        let mut board = Board::new();
        let id = board.add_piece(pos(1, 6), Piece::man(Color::White)).unwrap();
        assert!(board.crown(id));
        assert!(!board.crown(id));
        assert_eq!(board.piece(id), Some(Piece::king(Color::White)));
    }

    #[test]
    fn test_display_standard() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r   r   r   r  ");
        assert_eq!(lines[4], "4  .   .   .   .  ");
        assert_eq!(lines[7], "1    w   w   w   w");
        assert_eq!(lines[8], "   A B C D E F G H");
    }
}
