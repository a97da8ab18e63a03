//! Turn state machine: whose move it is, move application, captures,
//! forced continuation, promotion and win detection.
//!
//! ```text
//!   AwaitingMove(p) --apply quiet move--------------------> AwaitingMove(!p)
//!   AwaitingMove(p) --apply jump, more jumps for piece----> ForcedContinuation(p, piece)
//!   AwaitingMove(p) --apply jump, no more jumps-----------> AwaitingMove(!p)
//!   ForcedContinuation --apply jump (same piece only)-----> (same rules as above)
//!   any capture leaving a side with no pieces ------------> GameOver(winner)
//! ```

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use serde::Serialize;

use crate::board::{Board, PieceId};
use crate::config::GameConfig;
use crate::error::{DraughtsError, IllegalReason, MoveError, Result};
use crate::movegen::{LegalMove, MoveGenerator, MoveKind, MoveMap};
use crate::piece::{Color, Piece};
use crate::position::Position;

/// Where the game currently stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    AwaitingMove { player: Color },
    /// The piece on `piece` just jumped and must jump again.
    ForcedContinuation { player: Color, piece: Position },
    GameOver { winner: Color },
}

/// What happened to the turn after a move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "turn", rename_all = "snake_case")]
pub enum TurnChange {
    Passed { next: Color },
    Continues { piece: Position },
    GameOver { winner: Color },
}

/// Result of a successful `apply_move`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct MoveOutcome {
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
    pub captured: Vec<Position>,
    pub promoted: bool,
    pub turn: TurnChange,
}

impl MoveOutcome {
    pub fn winner(&self) -> Option<Color> {
        match self.turn {
            TurnChange::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn turn_passed(&self) -> bool {
        matches!(self.turn, TurnChange::Passed { .. })
    }
}

/// Read-only summary for front ends.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Status {
    pub to_move: Color,
    pub white_pieces: usize,
    pub red_pieces: usize,
    pub winner: Option<Color>,
    pub move_count: u32,
    /// Square of the piece that must keep jumping, if any.
    pub continuation: Option<Position>,
    /// The player on move has no legal move. The game does not end on this.
    pub stalled: bool,
}

/// A game in progress. The only mutator of its board.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    config: GameConfig,
    current: Color,
    move_count: u32,
    /// Legal destinations for each piece of `current`.
    legal: HashMap<PieceId, MoveMap>,
    /// Piece that must finish its capture sequence before the turn passes.
    lock: Option<PieceId>,
    winner: Option<Color>,
}

impl GameState {
    /// Standard opening with the default configuration.
    pub fn setup() -> GameState {
        Self::setup_with(GameConfig::default())
    }

    /// Standard opening.
    pub fn setup_with(config: GameConfig) -> GameState {
        Self::with_board(config, Board::standard())
    }

    /// A custom position. Fails if two pieces share a square or there are
    /// more pieces than the arena holds.
    pub fn from_pieces<I>(config: GameConfig, pieces: I) -> Result<GameState>
    where
        I: IntoIterator<Item = (Position, Piece)>,
    {
        let mut board = Board::new();
        for (at, piece) in pieces {
            board.add_piece(at, piece)?;
        }
        Ok(Self::with_board(config, board))
    }

    fn with_board(config: GameConfig, board: Board) -> GameState {
        let mut state = GameState {
            board,
            config,
            current: config.starting_player,
            move_count: 0,
            legal: HashMap::new(),
            lock: None,
            winner: None,
        };
        state.winner = decided_winner(&state.board);
        if state.winner.is_none() {
            state.begin_turn();
        }
        state
    }

    // ========== Queries ==========

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn current_player(&self) -> Color {
        self.current
    }

    /// Completed turns so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.board.count(color)
    }

    /// Every piece on the board with its square.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.board.pieces().map(|(_, at, piece)| (at, piece))
    }

    /// Square of the piece under a continuation lock.
    pub fn continuation(&self) -> Option<Position> {
        self.lock.and_then(|id| self.board.position_of(id))
    }

    pub fn phase(&self) -> Phase {
        if let Some(winner) = self.winner {
            return Phase::GameOver { winner };
        }
        match self.continuation() {
            Some(piece) => Phase::ForcedContinuation {
                player: self.current,
                piece,
            },
            None => Phase::AwaitingMove {
                player: self.current,
            },
        }
    }

    /// Legal destinations for the piece on `pos`. Empty when there is no
    /// piece, it is not that side's turn, another piece is locked in a
    /// capture sequence, or the game is over.
    pub fn legal_moves(&self, pos: Position) -> MoveMap {
        self.board
            .occupant(pos)
            .and_then(|id| self.legal.get(&id))
            .cloned()
            .unwrap_or_default()
    }

    /// Legal destinations for every piece of the player on move, keyed by square.
    pub fn legal_move_table(&self) -> BTreeMap<Position, MoveMap> {
        self.legal
            .iter()
            .filter_map(|(id, moves)| {
                let at = self.board.position_of(*id)?;
                Some((at, moves.clone()))
            })
            .collect()
    }

    /// Squares of the pieces that can move right now.
    pub fn movable_pieces(&self) -> Vec<Position> {
        let mut squares: Vec<Position> = self
            .legal
            .iter()
            .filter(|(_, moves)| !moves.is_empty())
            .filter_map(|(id, _)| self.board.position_of(*id))
            .collect();
        squares.sort();
        squares
    }

    pub fn status(&self) -> Status {
        Status {
            to_move: self.current,
            white_pieces: self.board.count(Color::White),
            red_pieces: self.board.count(Color::Red),
            winner: self.winner,
            move_count: self.move_count,
            continuation: self.continuation(),
            stalled: self.winner.is_none() && self.legal.values().all(MoveMap::is_empty),
        }
    }

    // ========== Commands ==========

    /// Move the piece on `from` to `to`.
    ///
    /// Captures and relocation happen in one step. The turn passes unless
    /// the move was a jump and the same piece can jump again.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameOver { winner }.into());
        }

        let illegal = |reason| DraughtsError::from(MoveError::IllegalMove { from, to, reason });

        let id = self
            .board
            .occupant(from)
            .ok_or_else(|| illegal(IllegalReason::NoPiece))?;
        let piece = self
            .board
            .piece(id)
            .ok_or_else(|| illegal(IllegalReason::NoPiece))?;
        if piece.color != self.current {
            return Err(illegal(IllegalReason::NotYourPiece(piece.color)));
        }
        if let Some(locked) = self.continuation().filter(|_| self.lock != Some(id)) {
            return Err(illegal(IllegalReason::ContinuationRequired(locked)));
        }
        let mv: LegalMove = self
            .legal
            .get(&id)
            .and_then(|moves| moves.get(&to))
            .cloned()
            .ok_or_else(|| illegal(IllegalReason::NotLegal))?;

        for &square in &mv.captures {
            self.board.capture(square)?;
        }
        self.board.relocate(id, to)?;
        let promoted = to.rank() == piece.color.promotion_rank() && self.board.crown(id);

        debug!(
            "{} {:?} {}->{} capturing {:?}",
            piece.color, mv.kind, from, to, mv.captures
        );
        if promoted {
            info!("{} piece crowned on {}", piece.color, to);
        }

        let outcome = |turn| MoveOutcome {
            from,
            to,
            kind: mv.kind,
            captured: mv.captures.clone(),
            promoted,
            turn,
        };

        if mv.is_jump() {
            if let Some(winner) = decided_winner(&self.board) {
                let moves = self.move_count + 1;
                info!("game over after {moves} moves, {winner} wins");
                self.winner = Some(winner);
                self.move_count += 1;
                self.legal.clear();
                self.lock = None;
                return Ok(outcome(TurnChange::GameOver { winner }));
            }

            let jumps = MoveGenerator::new(&self.board).jumps_from(to);
            if !jumps.is_empty() {
                let color = piece.color;
                debug!("{color} on {to} must keep jumping: {:?}", jumps.keys());
                self.legal.clear();
                self.legal.insert(id, jumps);
                self.lock = Some(id);
                return Ok(outcome(TurnChange::Continues { piece: to }));
            }
        }

        self.current = self.current.opponent();
        self.move_count += 1;
        self.begin_turn();
        Ok(outcome(TurnChange::Passed { next: self.current }))
    }

    /// Recompute legal moves for every piece of the player on move.
    fn begin_turn(&mut self) {
        let current = self.current;
        let generator = MoveGenerator::new(&self.board);
        let legal: HashMap<PieceId, MoveMap> = self
            .board
            .pieces()
            .filter(|(_, _, piece)| piece.color == current)
            .map(|(id, at, _)| (id, generator.moves_from(at)))
            .collect();
        if legal.values().all(MoveMap::is_empty) {
            warn!("{current} has no legal moves; the game is stalled");
        }
        self.legal = legal;
        self.lock = None;
    }
}

/// The winner once exactly one side has no pieces left.
fn decided_winner(board: &Board) -> Option<Color> {
    match (board.count(Color::White), board.count(Color::Red)) {
        (0, 0) => None,
        (0, _) => Some(Color::Red),
        (_, 0) => Some(Color::White),
        _ => None,
    }
}
