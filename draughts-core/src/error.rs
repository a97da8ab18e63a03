//! Error types for the rules engine.
//!
//! Every failure is returned to the caller as a typed value; the engine
//! never panics on bad input and never retries on its own.

use thiserror::Error;

use crate::piece::Color;
use crate::position::Position;

/// A coordinate outside the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("coordinate ({file}, {rank}) is outside the board (0-7)")]
    OutOfRange { file: i32, rank: i32 },
}

/// Malformed square or move notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("square notation must be two characters, got {0:?}")]
    BadLength(String),
    #[error("file letter must be A-H, got {0:?}")]
    BadFile(char),
    #[error("rank digit must be 1-8, got {0:?}")]
    BadRank(char),
    #[error("move must look like B3-A4 or B3xD5, got {0:?}")]
    BadMove(String),
}

/// Board invariant violations. Unreachable while `GameState` is the only mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is already occupied")]
    OccupiedSquare(Position),
    #[error("square {0} is already empty")]
    AlreadyEmpty(Position),
    #[error("no room for another piece on the board")]
    ArenaFull,
}

/// Why a requested move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("there is no piece on the source square")]
    NoPiece,
    #[error("the piece belongs to {0}, who is not on move")]
    NotYourPiece(Color),
    #[error("the piece on {0} must finish its capture sequence")]
    ContinuationRequired(Position),
    #[error("the destination is not among the piece's legal moves")]
    NotLegal,
}

/// Rejections from `GameState::apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move {from}-{to}: {reason}")]
    IllegalMove {
        from: Position,
        to: Position,
        reason: IllegalReason,
    },
    #[error("the game is over, {winner} won")]
    GameOver { winner: Color },
}

/// Umbrella error for the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraughtsError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, DraughtsError>;
