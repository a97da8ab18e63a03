//! WASM bindings for draughts-core
//!
//! Provides a JavaScript-friendly API for the rules engine. Squares are
//! passed as notation strings ("B3").

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{notation, Color, GameConfig, GameState, Position};

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize to plain JS objects (maps keyed by square become objects, not
/// `Map`s), matching the JSON the HTTP API returns.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_err)
}

fn square(s: &str) -> Result<Position, JsValue> {
    notation::decode(s).map_err(js_err)
}

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Standard opening. `starting` is "white" or "red"; anything else means white.
    #[wasm_bindgen(constructor)]
    pub fn new(starting: Option<String>) -> WasmGame {
        let color = starting
            .and_then(|s| s.parse::<Color>().ok())
            .unwrap_or(Color::White);
        WasmGame {
            inner: GameState::setup_with(GameConfig::new(color)),
        }
    }

    /// Player on move ("white" or "red")
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> String {
        self.inner.current_player().to_string()
    }

    /// Legal moves for the piece on `from` as { "D5": { kind, captures }, ... }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, from: &str) -> Result<JsValue, JsValue> {
        let moves = self.inner.legal_moves(square(from)?);
        to_js(&moves)
    }

    /// Squares of pieces that can move now
    #[wasm_bindgen(js_name = movablePieces)]
    pub fn movable_pieces(&self) -> Vec<String> {
        self.inner
            .movable_pieces()
            .into_iter()
            .map(notation::encode)
            .collect()
    }

    /// Apply a move. Returns the outcome or throws with the reason.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, from: &str, to: &str) -> Result<JsValue, JsValue> {
        let outcome = self
            .inner
            .apply_move(square(from)?, square(to)?)
            .map_err(js_err)?;
        to_js(&outcome)
    }

    /// Status: to_move, piece counts, winner, move_count, continuation, stalled
    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.status())
    }

    /// 64 glyphs in index order (A1, B1, ... H8): "w", "W", "r", "R" or "".
    pub fn board(&self) -> Vec<String> {
        Position::all()
            .map(|pos| {
                self.inner
                    .board()
                    .piece_at(pos)
                    .map(|piece| piece.glyph().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new(None)
    }
}
