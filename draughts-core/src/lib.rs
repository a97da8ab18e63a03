//! Rules engine for 8x8 draughts with flying kings and chained captures.
//!
//! # Coordinates
//!
//! ```text
//! Position { file, rank }, both 0-7.
//!   file 0 = A ... file 7 = H
//!   rank 0 = "1" (White's home edge) ... rank 7 = "8" (Red's home edge)
//! Pieces stand only on dark squares: (file + rank) odd.
//! ```
//!
//! # Rules
//!
//! ```text
//! Men:    one step diagonally forward; capture by jumping an adjacent
//!         enemy in any diagonal direction.
//! Kings:  slide any distance along a diagonal; may capture an enemy at any
//!         distance and land on any empty square beyond it, taking every
//!         enemy passed over on that line.
//! Crown:  a man reaching the far rank becomes a king immediately, even
//!         mid-capture.
//! Chains: after a jump, if the same piece can jump again it must, and the
//!         turn does not pass until it cannot.
//! Win:    capturing the opponent's last piece.
//! ```
//!
//! `GameState` is the entry point: `setup()`, `legal_moves()`,
//! `apply_move()`, `status()`.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod piece;
pub mod position;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::{Board, PieceId, Square};
pub use config::GameConfig;
pub use error::{
    BoardError, DraughtsError, IllegalReason, MoveError, NotationError, PositionError, Result,
};
pub use game::{GameState, MoveOutcome, Phase, Status, TurnChange};
pub use movegen::{LegalMove, MoveGenerator, MoveKind, MoveMap};
pub use piece::{Color, Piece};
pub use position::{Direction, Position};
