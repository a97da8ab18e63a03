//! Whole-game rule checks against the public API.
//!
//! Fixed scenarios first, then seeded random playouts that assert the
//! invariants after every single move.

use std::collections::BTreeMap;

use draughts_core::{
    Color, DraughtsError, GameConfig, GameState, IllegalReason, MoveError, MoveKind, Phase, Piece,
    Position, TurnChange,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sq(s: &str) -> Position {
    s.parse().unwrap()
}

fn game(to_move: Color, pieces: &[(&str, Piece)]) -> GameState {
    GameState::from_pieces(
        GameConfig::new(to_move),
        pieces.iter().map(|(at, piece)| (sq(at), *piece)),
    )
    .unwrap()
}

// ========== Setup ==========

#[test]
fn test_setup_has_twelve_each_and_empty_center() {
    let state = GameState::setup();
    let status = state.status();
    assert_eq!(status.white_pieces, 12);
    assert_eq!(status.red_pieces, 12);
    assert_eq!(status.to_move, Color::White);
    assert_eq!(status.winner, None);
    for (at, piece) in state.pieces() {
        assert!(at.is_dark(), "{at} is a light square");
        assert!(at.rank() != 3 && at.rank() != 4, "{at} is in the center");
        assert!(!piece.is_king());
    }
}

#[test]
fn test_opening_b3_moves() {
    let state = GameState::setup();
    let moves = state.legal_moves(sq("B3"));
    assert_eq!(moves.len(), 2);
    assert_eq!(moves[&sq("A4")].kind, MoveKind::Normal);
    assert_eq!(moves[&sq("C4")].kind, MoveKind::Normal);
}

#[test]
fn test_opening_red_pieces_have_no_moves_for_white_turn() {
    let state = GameState::setup();
    assert!(state.legal_moves(sq("C6")).is_empty());
    assert!(state.legal_moves(sq("D4")).is_empty());
}

// ========== Scenario: enemy directly in front of B3 ==========

#[test]
fn test_b3_jumps_red_on_c4() {
    // Standard opening with the red man from A6 standing on C4 instead.
    let pieces: Vec<(Position, Piece)> = GameState::setup()
        .pieces()
        .map(|(at, piece)| {
            if at == sq("A6") {
                (sq("C4"), piece)
            } else {
                (at, piece)
            }
        })
        .collect();
    let mut state = GameState::from_pieces(GameConfig::default(), pieces).unwrap();

    let moves = state.legal_moves(sq("B3"));
    let jump = &moves[&sq("D5")];
    assert_eq!(jump.kind, MoveKind::Jump);
    assert_eq!(jump.captures, vec![sq("C4")]);
    assert!(!moves.contains_key(&sq("C4")));
    assert_eq!(moves[&sq("A4")].kind, MoveKind::Normal);

    let outcome = state.apply_move(sq("B3"), sq("D5")).unwrap();
    assert_eq!(outcome.captured, vec![sq("C4")]);
    assert_eq!(state.piece_count(Color::Red), 11);
    assert_eq!(
        state.board().piece_at(sq("D5")),
        Some(Piece::man(Color::White))
    );
}

// ========== Kings ==========

#[test]
fn test_king_long_jump_takes_everything_passed_over() {
    let mut state = game(
        Color::White,
        &[
            ("B1", Piece::king(Color::White)),
            ("C2", Piece::man(Color::Red)),
            ("E4", Piece::man(Color::Red)),
            ("A8", Piece::man(Color::Red)),
        ],
    );
    let outcome = state.apply_move(sq("B1"), sq("G6")).unwrap();
    assert_eq!(outcome.captured, vec![sq("C2"), sq("E4")]);
    assert_eq!(state.piece_count(Color::Red), 1);
    assert!(state.board().is_empty(sq("C2")));
    assert!(state.board().is_empty(sq("E4")));
    assert_eq!(
        state.board().piece_at(sq("G6")),
        Some(Piece::king(Color::White))
    );
}

#[test]
fn test_king_chain_changes_direction() {
    // B1 takes D3 landing on E4, then turns to take D5.
    let mut state = game(
        Color::Red,
        &[
            ("B1", Piece::king(Color::Red)),
            ("D3", Piece::man(Color::White)),
            ("D5", Piece::man(Color::White)),
            ("A2", Piece::man(Color::White)),
        ],
    );
    let outcome = state.apply_move(sq("B1"), sq("E4")).unwrap();
    assert_eq!(outcome.turn, TurnChange::Continues { piece: sq("E4") });

    let moves = state.legal_moves(sq("E4"));
    assert!(moves.values().all(|mv| mv.kind == MoveKind::Jump));
    assert_eq!(moves[&sq("C6")].captures, vec![sq("D5")]);
    assert_eq!(moves[&sq("B7")].captures, vec![sq("D5")]);
    assert_eq!(moves[&sq("A8")].captures, vec![sq("D5")]);

    let outcome = state.apply_move(sq("E4"), sq("B7")).unwrap();
    assert_eq!(outcome.turn, TurnChange::Passed { next: Color::White });
    assert_eq!(state.piece_count(Color::White), 1);
}

#[test]
fn test_double_jump_with_man_to_win() {
    let mut state = game(
        Color::White,
        &[
            ("B1", Piece::man(Color::White)),
            ("C2", Piece::man(Color::Red)),
            ("E4", Piece::man(Color::Red)),
        ],
    );
    let first = state.apply_move(sq("B1"), sq("D3")).unwrap();
    assert_eq!(first.turn, TurnChange::Continues { piece: sq("D3") });
    assert_eq!(state.move_count(), 0);

    let second = state.apply_move(sq("D3"), sq("F5")).unwrap();
    assert_eq!(second.winner(), Some(Color::White));
    assert_eq!(state.phase(), Phase::GameOver { winner: Color::White });
    assert_eq!(state.move_count(), 1);
    assert_eq!(
        state.apply_move(sq("F5"), sq("G6")).unwrap_err(),
        DraughtsError::Move(MoveError::GameOver { winner: Color::White })
    );
}

// ========== Serialized boundary ==========

#[test]
fn test_outcome_json_shape() {
    let mut state = GameState::setup();
    let outcome = state.apply_move(sq("B3"), sq("C4")).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["from"], "B3");
    assert_eq!(json["to"], "C4");
    assert_eq!(json["kind"], "normal");
    assert_eq!(json["captured"], serde_json::json!([]));
    assert_eq!(json["promoted"], false);
    assert_eq!(json["turn"]["turn"], "passed");
    assert_eq!(json["turn"]["next"], "red");
}

#[test]
fn test_status_and_moves_json_shape() {
    let state = GameState::setup();
    let status = serde_json::to_value(state.status()).unwrap();
    assert_eq!(status["to_move"], "white");
    assert_eq!(status["white_pieces"], 12);
    assert_eq!(status["winner"], serde_json::Value::Null);

    let moves = serde_json::to_value(state.legal_moves(sq("B3"))).unwrap();
    assert_eq!(moves["A4"]["kind"], "normal");
    assert_eq!(moves["C4"]["captures"], serde_json::json!([]));

    let phase = serde_json::to_value(state.phase()).unwrap();
    assert_eq!(phase["state"], "awaiting_move");
    assert_eq!(phase["player"], "white");
}

// ========== Random playouts ==========

fn snapshot(state: &GameState) -> BTreeMap<Position, Piece> {
    state.pieces().collect()
}

/// Men only ever get forward quiet moves, one diagonal step away.
fn assert_men_move_forward(state: &GameState) {
    for (from, moves) in state.legal_move_table() {
        let Some(piece) = state.board().piece_at(from) else {
            panic!("legal moves listed for empty square {from}");
        };
        if piece.is_king() {
            continue;
        }
        for (to, mv) in &moves {
            if mv.kind == MoveKind::Normal {
                let dr = to.rank() as i32 - from.rank() as i32;
                let df = to.file() as i32 - from.file() as i32;
                assert_eq!(dr, piece.color.forward(), "{from}->{to} is not forward");
                assert_eq!(df.abs(), 1, "{from}->{to} is not diagonal");
            }
        }
    }
}

fn play_random_game(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = GameState::setup();

    for _ in 0..400 {
        if state.is_over() {
            break;
        }
        assert_men_move_forward(&state);

        let table: Vec<(Position, Vec<Position>)> = state
            .legal_move_table()
            .into_iter()
            .filter(|(_, moves)| !moves.is_empty())
            .map(|(from, moves)| (from, moves.keys().copied().collect()))
            .collect();
        if table.is_empty() {
            assert!(state.status().stalled);
            break;
        }

        let (from, destinations) = &table[rng.random_range(0..table.len())];
        let to = destinations[rng.random_range(0..destinations.len())];

        let mover = state.current_player();
        let before = snapshot(&state);
        let moving = before[from];
        let opponents_before = state.piece_count(mover.opponent());
        let expected = state.legal_moves(*from)[&to].clone();

        let outcome = state.apply_move(*from, to).unwrap();
        let after = snapshot(&state);

        // Capture atomicity.
        assert_eq!(outcome.captured, expected.captures);
        assert_eq!(
            state.piece_count(mover.opponent()),
            opponents_before - outcome.captured.len()
        );
        for square in &outcome.captured {
            let still_there = after.contains_key(square);
            assert!(!still_there, "captured {square} still occupied");
        }
        assert_eq!(after.get(&to).map(|p| p.color), Some(mover));
        assert!(!after.contains_key(from));

        // Promotion is monotonic and only happens on the far rank.
        let landed = after[&to];
        if moving.is_king() {
            assert!(landed.is_king());
            assert!(!outcome.promoted);
        }
        if outcome.promoted {
            assert_eq!(to.rank(), mover.promotion_rank());
        }

        // Nothing else moved or changed.
        for (square, piece) in &before {
            if square != from && !outcome.captured.contains(square) {
                assert_eq!(after.get(square), Some(piece));
            }
        }

        match outcome.turn {
            TurnChange::Continues { piece } => {
                assert_eq!(piece, to);
                assert_eq!(state.current_player(), mover);
                let table = state.legal_move_table();
                for (square, moves) in &table {
                    if *square == to {
                        assert!(!moves.is_empty());
                        assert!(moves.values().all(|mv| mv.kind == MoveKind::Jump));
                    } else {
                        assert!(moves.is_empty());
                    }
                }
                // Any other piece of the mover is refused.
                for (square, piece) in &after {
                    if piece.color == mover && *square != to {
                        for target in Position::all() {
                            let mut probe = state.clone();
                            match probe.apply_move(*square, target) {
                                Err(DraughtsError::Move(MoveError::IllegalMove {
                                    reason: IllegalReason::ContinuationRequired(at),
                                    ..
                                })) => assert_eq!(at, to),
                                other => panic!("expected continuation lock, got {other:?}"),
                            }
                        }
                    }
                }
            }
            TurnChange::Passed { next } => {
                assert_eq!(next, mover.opponent());
                assert_eq!(state.current_player(), next);
                assert_eq!(state.continuation(), None);
            }
            TurnChange::GameOver { winner } => {
                assert_eq!(winner, mover);
                assert_eq!(state.piece_count(mover.opponent()), 0);
                assert!(matches!(
                    state.clone().apply_move(to, to),
                    Err(DraughtsError::Move(MoveError::GameOver { .. }))
                ));
            }
        }
    }
}

#[test]
fn test_random_playouts_keep_invariants() {
    for seed in 0..60 {
        play_random_game(seed);
    }
}
